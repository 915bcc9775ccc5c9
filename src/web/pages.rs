//! Server-rendered HTML for the caption form

use axum::http::StatusCode;

use crate::models::{Generation, Platform};
use crate::session::SessionState;

/// One-shot banner shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Success(String),
}

pub struct PageView<'a> {
    pub title: &'a str,
    pub models: &'a [&'a str],
    pub session: &'a SessionState,
    pub notice: Option<Notice>,
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Main caption generator page
pub fn index_page(view: &PageView<'_>) -> String {
    let session = view.session;
    let form = &session.form;

    let model_options: String = view
        .models
        .iter()
        .map(|m| option(m, *m == session.model))
        .collect();

    let platform_options: String = Platform::ALL
        .iter()
        .map(|p| option(p.as_str(), *p == form.platform))
        .collect();

    let notice = match &view.notice {
        Some(Notice::Warning(msg)) => {
            format!(r#"<div class="notice warning">{}</div>"#, escape_html(msg))
        }
        Some(Notice::Success(msg)) => {
            format!(r#"<div class="notice success">{}</div>"#, escape_html(msg))
        }
        None => String::new(),
    };

    let results = session
        .generation
        .as_ref()
        .map(results_section)
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <aside class="sidebar">
        <h2>⚙️ Settings</h2>
        <label for="model">Choose Model</label>
        <select id="model" name="model" form="caption-form">{model_options}</select>
        <h3>How It Works:</h3>
        <ul>
            <li>📝 Enter context, mood &amp; platform</li>
            <li>🔥 AI generates a perfect caption</li>
            <li>📲 Copy &amp; use instantly!</li>
        </ul>
        <hr>
        <p class="powered">Powered by <a href="https://groq.com/">Groq API</a></p>
    </aside>

    <main>
        <h1>🧠 AI Caption Generator</h1>
        <p class="caption">🚀 Generate catchy captions for social media</p>

        <h2>📌 Enter Caption Details</h2>
        <form id="caption-form" method="post" action="/generate">
            <label for="context">Describe the context (e.g., Vacation in Bali, Product launch, Birthday Party)</label>
            <textarea id="context" name="context" rows="4">{context}</textarea>

            <label for="mood">Choose a mood (Fun, Motivational, Professional, Inspirational):</label>
            <input id="mood" name="mood" type="text" value="{mood}">

            <label for="platform">Select platform:</label>
            <select id="platform" name="platform">{platform_options}</select>

            <label class="checkbox"><input type="checkbox" name="include_hashtags" value="on"{hashtags_checked}> Include relevant hashtags?</label>

            <button type="submit" id="generate-btn">✨ Generate Caption</button>
            <div id="spinner" class="spinner" hidden><span class="dot"></span> 🧠 AI is generating your caption...</div>
        </form>

        {notice}
        {results}
    </main>

    <script>
{js}
    </script>
</body>
</html>"#,
        title = escape_html(view.title),
        css = CSS,
        js = JS,
        context = escape_html(&form.context),
        mood = escape_html(&form.mood),
        hashtags_checked = if form.include_hashtags { " checked" } else { "" },
    )
}

fn option(value: &str, selected: bool) -> String {
    let value = escape_html(value);
    let selected = if selected { " selected" } else { "" };
    format!(r#"<option value="{value}"{selected}>{value}</option>"#)
}

fn results_section(generation: &Generation) -> String {
    format!(
        r#"<section class="results">
            <div class="col-main">
                <h2>🔥 Your AI-Generated Caption:</h2>
                <div class="final-caption">{caption}</div>
                <form method="post" action="/copy">
                    <button type="submit">📋 Copy Caption</button>
                </form>
            </div>
            <div class="col-side">
                <details>
                    <summary><strong>📜 Behind the Scenes (AI Thinking Process)</strong></summary>
                    <label for="thinking">AI Thought Process:</label>
                    <textarea id="thinking" rows="8" readonly disabled>{thinking}</textarea>
                </details>
                <details>
                    <summary><strong>📊 Model Stats</strong></summary>
                    {stats}
                </details>
            </div>
        </section>"#,
        caption = escape_html(&generation.split.caption),
        thinking = escape_html(&generation.split.thinking),
        stats = model_stats(generation),
    )
}

fn model_stats(generation: &Generation) -> String {
    let Some(metadata) = generation.metadata.as_ref() else {
        return r#"<div class="notice warning">⚠️ No metadata available.</div>"#.to_string();
    };

    let usage = metadata.token_usage.as_ref();
    let model = metadata
        .model_name
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "N/A".to_string());
    let total_tokens = usage
        .and_then(|u| u.total_tokens)
        .map(|t| t.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let completion_time = seconds(usage.and_then(|u| u.completion_time));
    let prompt_time = seconds(usage.and_then(|u| u.prompt_time));

    format!(
        r#"<ul class="stats">
                        <li><strong>Model Used:</strong> <code>{model}</code></li>
                        <li><strong>Total Tokens:</strong> <code>{total_tokens}</code></li>
                        <li><strong>Completion Time:</strong> <code>{completion_time}</code></li>
                        <li><strong>Prompt Time:</strong> <code>{prompt_time}</code></li>
                        <li><strong>Generated At:</strong> <code>{generated_at}</code></li>
                    </ul>"#,
        generated_at = generation.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

fn seconds(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v} sec"),
        None => "N/A".to_string(),
    }
}

/// Minimal page for failures that escape the handlers
pub fn error_page(status: StatusCode, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Error {code}</title>
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 720px; margin: 40px auto; padding: 0 20px; }}
        .error {{ background: #fdecea; color: #8a1c12; padding: 16px; border-radius: 6px; }}
    </style>
</head>
<body>
    <div class="error">❌ {reason}: {message}</div>
    <p><a href="/">← Back to the caption generator</a></p>
</body>
</html>"#,
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = escape_html(message),
    )
}

const CSS: &str = r#"
* { box-sizing: border-box; }

body {
    font-family: system-ui, -apple-system, sans-serif;
    margin: 0;
    display: grid;
    grid-template-columns: 260px 1fr;
    min-height: 100vh;
    color: #262730;
}

.sidebar {
    background: #f0f2f6;
    padding: 24px 18px;
}

.sidebar ul { padding-left: 18px; }
.sidebar .powered { font-size: 0.85em; color: #666; }

main {
    max-width: 860px;
    padding: 32px 40px;
}

main .caption { color: #808495; margin-top: -8px; }

label { display: block; margin: 14px 0 6px; font-size: 0.9em; }
label.checkbox { display: flex; gap: 8px; align-items: center; }

textarea, input[type=text], select {
    width: 100%;
    padding: 8px;
    border: 1px solid #d0d3da;
    border-radius: 6px;
    font: inherit;
}

button {
    margin-top: 16px;
    padding: 8px 16px;
    border: 1px solid #d0d3da;
    border-radius: 6px;
    background: #fff;
    cursor: pointer;
}

button:hover { border-color: #ff4b4b; color: #ff4b4b; }
button:disabled { opacity: 0.5; cursor: wait; }

.spinner { margin-top: 12px; color: #555; }
.spinner .dot {
    display: inline-block;
    width: 12px;
    height: 12px;
    border: 2px solid #ccc;
    border-top-color: #ff4b4b;
    border-radius: 50%;
    animation: spin 0.8s linear infinite;
}

@keyframes spin { to { transform: rotate(360deg); } }

.notice { margin-top: 16px; padding: 12px 16px; border-radius: 6px; }
.notice.warning { background: #fffce7; color: #926c05; }
.notice.success { background: #e8f9ee; color: #177233; }

.results {
    margin-top: 28px;
    display: grid;
    grid-template-columns: 2fr 1fr;
    gap: 24px;
}

.final-caption { white-space: pre-wrap; line-height: 1.5; }

details {
    border: 1px solid #d0d3da;
    border-radius: 6px;
    padding: 8px 12px;
    margin-bottom: 12px;
}

.stats { padding-left: 18px; font-size: 0.9em; }
"#;

const JS: &str = r#"
document.getElementById('caption-form').addEventListener('submit', function () {
    document.getElementById('spinner').hidden = false;
    document.getElementById('generate-btn').disabled = true;
});
"#;
