use axum::extract::{Extension, Form, State};
use axum::response::Html;
use chrono::Utc;
use serde::Deserialize;
use std::time::Instant;

use super::AppState;
use super::pages::{self, Notice, PageView};
use crate::completion::{AVAILABLE_MODELS, CompletionClient, is_available_model};
use crate::error::{CaptionError, Result};
use crate::models::{FormState, Generation, Platform};
use crate::prompt::build_prompt;
use crate::session::{SessionId, SessionState};
use crate::splitter::split_response;

pub const BLANK_CONTEXT_WARNING: &str = "⚠️ Please enter some context before generating!";
pub const COPIED_MESSAGE: &str = "✅ Caption copied to clipboard!";
pub const NOTHING_TO_COPY_WARNING: &str = "⚠️ Generate a caption before copying.";

/// Fields posted by the caption form. An unchecked checkbox is simply absent.
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub include_hashtags: Option<String>,
}

impl GenerateForm {
    fn form_state(&self) -> Result<FormState> {
        let platform = match self.platform.as_deref() {
            Some(p) => p.parse::<Platform>()?,
            None => Platform::default(),
        };
        Ok(FormState {
            context: self.context.clone(),
            mood: self.mood.clone(),
            platform,
            include_hashtags: self.include_hashtags.is_some(),
        })
    }
}

fn render(state: &AppState, session: &SessionState, notice: Option<Notice>) -> Html<String> {
    Html(pages::index_page(&PageView {
        title: &state.config.server.name,
        models: AVAILABLE_MODELS,
        session,
        notice,
    }))
}

/// Visitors without a session see the default form; a session opens on their first POST
pub async fn index(
    State(state): State<AppState>,
    session: Option<Extension<SessionId>>,
) -> Html<String> {
    let snapshot = match session {
        Some(Extension(id)) => state.sessions.get(id).await,
        None => SessionState::new(&state.config.groq.model),
    };
    render(&state, &snapshot, None)
}

pub async fn generate(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(input): Form<GenerateForm>,
) -> Result<Html<String>> {
    let model = input
        .model
        .clone()
        .unwrap_or_else(|| state.config.groq.model.clone());
    if !is_available_model(&model) {
        return Err(CaptionError::Validation(format!(
            "Model '{model}' is not available"
        )));
    }
    let form = input.form_state()?;

    let snapshot = state
        .sessions
        .update(session, |s| {
            s.form = form.clone();
            s.model = model.clone();
            s.copied_caption = None;
            s.generation = None;
        })
        .await;

    if !form.has_context() {
        tracing::warn!(session = %session.0, "Generate requested with blank context");
        return Ok(render(
            &state,
            &snapshot,
            Some(Notice::Warning(BLANK_CONTEXT_WARNING.to_string())),
        ));
    }

    let client = CompletionClient::new(state.transport.clone(), model.clone())?;
    let prompt = build_prompt(&form);

    let started = Instant::now();
    let result = client.complete(&prompt).await?;
    tracing::info!(
        session = %session.0,
        model = %client.model(),
        prompt_len = prompt.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Caption generated"
    );

    let generation = Generation {
        split: split_response(&result.raw_text),
        metadata: result.metadata,
        model,
        generated_at: Utc::now(),
    };

    let snapshot = state
        .sessions
        .update(session, |s| s.generation = Some(generation))
        .await;

    Ok(render(&state, &snapshot, None))
}

/// Remember the current caption in the session. No clipboard is touched.
pub async fn copy_caption(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Html<String> {
    let mut copied = false;
    let snapshot = state
        .sessions
        .update(session, |s| {
            if let Some(generation) = &s.generation {
                s.copied_caption = Some(generation.split.caption.clone());
                copied = true;
            }
        })
        .await;

    let notice = if copied {
        tracing::info!(session = %session.0, "Caption copied");
        Notice::Success(COPIED_MESSAGE.to_string())
    } else {
        Notice::Warning(NOTHING_TO_COPY_WARNING.to_string())
    };

    render(&state, &snapshot, Some(notice))
}
