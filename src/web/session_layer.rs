use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use uuid::Uuid;

use crate::session::{SESSION_COOKIE, SessionId, SessionStore};

/// Resolve the caller's session from its cookie and expose it as a request extension.
/// Reads never open a session; only state-changing requests do.
pub async fn attach_session(
    State(sessions): State<Arc<SessionStore>>,
    mut req: Request,
    next: Next,
) -> Response {
    let candidate = session_from_headers(req.headers());
    let resolved = if req.method() == Method::GET || req.method() == Method::HEAD {
        sessions.lookup(candidate).await.map(|id| (id, false))
    } else {
        Some(sessions.resolve(candidate).await)
    };

    let Some((id, created)) = resolved else {
        return next.run(req).await;
    };
    req.extensions_mut().insert(id);

    let mut response = next.run(req).await;
    if created {
        let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", id.0);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("Failed to build session cookie: {}", e),
        }
    }
    response
}

pub(crate) fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == SESSION_COOKIE)
        .and_then(|(_, v)| Uuid::parse_str(v.trim()).ok())
        .map(SessionId)
}
