use super::*;
use crate::completion::tests::{MockTransport, mock_response};
use crate::models::TokenUsage;
use crate::session::{SESSION_COOKIE, SessionId};
use crate::web::routes::{BLANK_CONTEXT_WARNING, COPIED_MESSAGE, NOTHING_TO_COPY_WARNING};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn test_app(mock: Arc<MockTransport>) -> (Router, AppState) {
    let state = AppState::new(Arc::new(Config::default()), mock);
    (router(state.clone()), state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("router should not fail");
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string());
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    (status, cookie, String::from_utf8_lossy(&body).to_string())
}

fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_has_no_session() {
    let (app, state) = test_app(Arc::new(MockTransport::new(vec![])));
    let (status, cookie, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
    assert!(cookie.is_none());
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn test_index_opens_no_session() {
    let (app, state) = test_app(Arc::new(MockTransport::new(vec![])));
    for _ in 0..25 {
        let (status, cookie, body) = send(&app, get("/", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(cookie.is_none());
        assert!(body.contains("AI Caption Generator"));
        assert!(body.contains(r#"<option value="Instagram" selected>"#));
    }
    assert!(state.sessions.is_empty().await);

    // Unknown cookies are not adopted either
    let stale = format!("{SESSION_COOKIE}={}", uuid::Uuid::new_v4());
    let (status, cookie, _) = send(&app, get("/", Some(&stale))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cookie.is_none());
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn test_first_post_sets_session_cookie() {
    let (app, state) = test_app(Arc::new(MockTransport::new(vec![])));
    let (status, cookie, _) = send(
        &app,
        post_form("/generate", None, "context=&mood=Calm&platform=Youtube"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let cookie = cookie.expect("first form post should set a session cookie");
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert_eq!(state.sessions.len().await, 1);

    // A returning visitor keeps the same session and sees its form values
    let (_, second, body) = send(&app, get("/", Some(&cookie))).await;
    assert!(second.is_none());
    assert!(body.contains(r#"<option value="Youtube" selected>"#));
    assert_eq!(state.sessions.len().await, 1);
}

#[tokio::test]
async fn test_blank_context_blocks_generation() {
    let mock = Arc::new(MockTransport::new(vec![mock_response("unused", None)]));
    let (app, _) = test_app(mock.clone());

    let (status, _, body) = send(
        &app,
        post_form(
            "/generate",
            None,
            "context=++%0A&mood=Fun&platform=Twitter&include_hashtags=on",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(BLANK_CONTEXT_WARNING));
    assert!(!body.contains("Copy Caption"));
    // Form stays interactive with the submitted values
    assert!(body.contains(r#"<option value="Twitter" selected>"#));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_generate_and_copy_flow() {
    let usage = TokenUsage {
        total_tokens: Some(256),
        completion_time: Some(0.9),
        prompt_time: Some(0.03),
        ..Default::default()
    };
    let mock = Arc::new(MockTransport::new(vec![mock_response(
        "<think>Bali, sun, fun</think>\n\nSun-kissed and carefree in Bali ☀️ #BaliVibes",
        Some(usage),
    )]));
    let (app, state) = test_app(mock.clone());

    let (status, cookie, body) = send(
        &app,
        post_form(
            "/generate",
            None,
            "model=deepseek-r1-distill-llama-70b&context=Vacation+in+Bali&mood=Fun&platform=Instagram&include_hashtags=on",
        ),
    )
    .await;
    let cookie = cookie.expect("session cookie");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sun-kissed and carefree in Bali ☀️ #BaliVibes"));
    assert!(body.contains("Bali, sun, fun"));
    assert!(body.contains("<code>256</code>"));
    assert!(body.contains("Copy Caption"));

    {
        let requests = mock.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let prompt = &requests[0].messages[0].content;
        assert!(prompt.contains("Vacation in Bali"));
        assert!(prompt.contains("Fun"));
        assert!(prompt.contains("Instagram"));
        assert!(prompt.contains("Suggest 3-5 trending hashtags"));
    }

    let (status, _, body) = send(&app, post_form("/copy", Some(&cookie), "")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(COPIED_MESSAGE));
    // Result panels survive the copy round trip
    assert!(body.contains("Sun-kissed and carefree in Bali"));

    let (_, raw_id) = cookie.split_once('=').expect("cookie should be name=value");
    let id = SessionId(uuid::Uuid::parse_str(raw_id).expect("cookie should carry a uuid"));
    let session = state.sessions.get(id).await;
    assert_eq!(
        session.copied_caption.as_deref(),
        Some("Sun-kissed and carefree in Bali ☀️ #BaliVibes")
    );
}

#[tokio::test]
async fn test_unchecked_hashtags_omits_guideline() {
    let mock = Arc::new(MockTransport::new(vec![mock_response("Ship it.", None)]));
    let (app, _) = test_app(mock.clone());

    let (status, _, body) = send(
        &app,
        post_form(
            "/generate",
            None,
            "context=Product+launch&mood=Professional&platform=LinkedIn",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ship it."));
    assert!(body.contains("No additional thoughts generated."));
    assert!(body.contains("No metadata available."));

    let requests = mock.requests.lock().unwrap();
    assert!(!requests[0].messages[0].content.contains("hashtags relevant"));
}

#[tokio::test]
async fn test_copy_without_generation_warns() {
    let (app, _) = test_app(Arc::new(MockTransport::new(vec![])));
    let (status, _, body) = send(&app, post_form("/copy", None, "")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(NOTHING_TO_COPY_WARNING));
}

#[tokio::test]
async fn test_upstream_failure_propagates() {
    // No queued responses: the mock transport fails the call
    let mock = Arc::new(MockTransport::new(vec![]));
    let (app, _) = test_app(mock.clone());

    let (status, _, body) = send(
        &app,
        post_form("/generate", None, "context=Birthday+Party&mood=Fun&platform=Facebook"),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("No more mock responses"));
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_failed_generation_clears_previous_caption() {
    // One queued response: the second generate call fails
    let mock = Arc::new(MockTransport::new(vec![mock_response(
        "<think>cake</think>Another trip around the sun 🎂",
        None,
    )]));
    let (app, state) = test_app(mock.clone());

    let (status, cookie, body) = send(
        &app,
        post_form("/generate", None, "context=Birthday+Party&mood=Fun&platform=Facebook"),
    )
    .await;
    let cookie = cookie.expect("session cookie");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Copy Caption"));

    let (status, _, _) = send(
        &app,
        post_form(
            "/generate",
            Some(&cookie),
            "context=Team+offsite&mood=Professional&platform=LinkedIn",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(mock.request_count(), 2);

    let (status, _, body) = send(&app, get("/", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Copy Caption"));
    assert!(!body.contains("Another trip around the sun"));
    // The failed submission's values are what the form shows
    assert!(body.contains("Team offsite"));

    let (status, _, body) = send(&app, post_form("/copy", Some(&cookie), "")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(NOTHING_TO_COPY_WARNING));
    assert!(!body.contains(COPIED_MESSAGE));

    let (_, raw_id) = cookie.split_once('=').expect("cookie should be name=value");
    let id = SessionId(uuid::Uuid::parse_str(raw_id).expect("cookie should carry a uuid"));
    let session = state.sessions.get(id).await;
    assert!(session.generation.is_none());
    assert!(session.copied_caption.is_none());
}

#[tokio::test]
async fn test_unknown_platform_rejected() {
    let mock = Arc::new(MockTransport::new(vec![]));
    let (app, _) = test_app(mock.clone());
    let (status, _, _) = send(
        &app,
        post_form("/generate", None, "context=Hi&platform=MySpace"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_unknown_model_rejected() {
    let mock = Arc::new(MockTransport::new(vec![]));
    let (app, _) = test_app(mock.clone());
    let (status, _, _) = send(
        &app,
        post_form("/generate", None, "model=gpt-4o&context=Hi&platform=Instagram"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(mock.request_count(), 0);
}
