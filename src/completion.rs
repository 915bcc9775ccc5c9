use std::sync::Arc;

use crate::error::{CaptionError, Result};
use crate::models::{ChatMessage, CompletionResult, GroqRequest, ResponseMetadata};
use crate::transport::Transport;

/// Models offered in the sidebar selector
pub const AVAILABLE_MODELS: &[&str] = &["deepseek-r1-distill-llama-70b"];
pub const TEMPERATURE: f32 = 0.5;

pub fn is_available_model(model: &str) -> bool {
    AVAILABLE_MODELS.contains(&model)
}

pub struct CompletionClient {
    tx: Arc<dyn Transport>,
    model: String,
}

impl CompletionClient {
    pub fn new(tx: Arc<dyn Transport>, model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        if !is_available_model(&model) {
            return Err(CaptionError::Validation(format!(
                "Model '{model}' is not in the list of available models"
            )));
        }
        Ok(Self { tx, model })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the response text with whatever usage data came back
    pub async fn complete(&self, prompt: &str) -> Result<CompletionResult> {
        let request = GroqRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: TEMPERATURE,
        };

        let response = self.tx.chat(&request).await?;

        let raw_text = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CaptionError::Internal("Groq API returned empty choices".to_string()))?;

        let metadata = if response.model.is_none() && response.usage.is_none() {
            None
        } else {
            Some(ResponseMetadata {
                model_name: response.model,
                token_usage: response.usage,
            })
        };

        Ok(CompletionResult { raw_text, metadata })
    }
}
