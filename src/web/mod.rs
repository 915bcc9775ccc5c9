//! HTTP surface of the caption generator

pub mod pages;
pub mod routes;
mod session_layer;

#[cfg(test)]
mod test_routes;

use axum::{Router, middleware, routing::get, routing::post};
use std::sync::Arc;

use crate::config::Config;
use crate::session::SessionStore;
use crate::transport::Transport;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub transport: Arc<dyn Transport>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Arc<Config>, transport: Arc<dyn Transport>) -> Self {
        let sessions = Arc::new(SessionStore::new(
            Some(&config.groq.model),
            config.session_idle(),
        ));
        Self {
            config,
            transport,
            sessions,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/generate", post(routes::generate))
        .route("/copy", post(routes::copy_caption))
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            session_layer::attach_session,
        ))
        // Health stays outside the session layer
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}
