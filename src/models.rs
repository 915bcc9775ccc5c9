use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CaptionError;

/// Social platform the caption is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Instagram,
    Twitter,
    LinkedIn,
    Facebook,
    Youtube,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Instagram,
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::Facebook,
        Platform::Youtube,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter",
            Platform::LinkedIn => "LinkedIn",
            Platform::Facebook => "Facebook",
            Platform::Youtube => "Youtube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CaptionError::Validation(format!("Unknown platform: {s}")))
    }
}

/// Values of the caption form for one session
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub context: String,
    pub mood: String,
    pub platform: Platform,
    pub include_hashtags: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            context: String::new(),
            mood: String::new(),
            platform: Platform::default(),
            include_hashtags: true,
        }
    }
}

impl FormState {
    pub fn has_context(&self) -> bool {
        !self.context.trim().is_empty()
    }
}

// Groq chat message format
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

// Groq API request format
#[derive(Debug, Serialize, Clone)]
pub struct GroqRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

// Groq API response format
#[derive(Debug, Deserialize, Default)]
pub struct GroqResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}

/// Token counts and timings reported by the completion service
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    #[serde(default)]
    pub completion_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
    #[serde(default)]
    pub prompt_time: Option<f64>,
    #[serde(default)]
    pub completion_time: Option<f64>,
    #[serde(default)]
    pub total_time: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseMetadata {
    pub model_name: Option<String>,
    pub token_usage: Option<TokenUsage>,
}

/// Text and optional usage metadata of one completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    pub raw_text: String,
    pub metadata: Option<ResponseMetadata>,
}

/// Model output separated into reasoning trace and final caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitResponse {
    pub thinking: String,
    pub caption: String,
}

/// A finished generation kept in the session for rendering and copying
#[derive(Debug, Clone)]
pub struct Generation {
    pub split: SplitResponse,
    pub metadata: Option<ResponseMetadata>,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}
