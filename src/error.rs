use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by the caption generator
#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Groq API key not found. Please set the GROQ_API_KEY environment variable.")]
    MissingApiKey,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Groq API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CaptionError>;

impl CaptionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CaptionError::Validation(_) => StatusCode::BAD_REQUEST,
            CaptionError::Http(_) | CaptionError::Api { .. } | CaptionError::Json(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CaptionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(%status, "Request failed: {}", self);
        } else {
            tracing::warn!(%status, "Request rejected: {}", self);
        }
        let body = crate::web::pages::error_page(status, &self.to_string());
        (status, Html(body)).into_response()
    }
}
