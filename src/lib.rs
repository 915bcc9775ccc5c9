pub mod completion;
pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod session;
pub mod splitter;
pub mod transport;
pub mod web;

pub use crate::completion::CompletionClient;
pub use crate::error::{CaptionError, Result};
pub use crate::prompt::build_prompt;
pub use crate::splitter::split_response;
