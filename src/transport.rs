use async_trait::async_trait;
use reqwest::Client;

use crate::error::{CaptionError, Result};
use crate::models::{GroqRequest, GroqResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn chat(&self, req: &GroqRequest) -> Result<GroqResponse>;
}

/// Single-shot client for Groq's OpenAI-compatible chat completion endpoint.
/// Failures are returned to the caller as-is; nothing is retried.
pub struct GroqTransport {
    client: Client,
    api_key: String,
    api_url: String,
}

impl GroqTransport {
    pub fn new(api_key: String, api_url: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(CaptionError::MissingApiKey);
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            api_url,
        })
    }
}

#[async_trait]
impl Transport for GroqTransport {
    async fn chat(&self, req: &GroqRequest) -> Result<GroqResponse> {
        tracing::debug!(model = %req.model, url = %self.api_url, "Sending Groq chat request");

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CaptionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        parse_chat_response(&body)
    }
}

pub(crate) fn parse_chat_response(body: &[u8]) -> Result<GroqResponse> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::error!("Failed to parse Groq API response: {}", e);
        CaptionError::from(e)
    })
}
