//! Session cookie handling and the session introspection endpoint.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, AUTHORIZATION, COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::state::AppState;
use super::store::CreatedSession;

pub(crate) const SESSION_COOKIE_NAME: &str = "session_id";

#[derive(Debug, Serialize)]
pub(crate) struct SessionResponse {
    identity: String,
    remember: bool,
}

/// Report whether the request carries a live session.
///
/// Missing or expired sessions answer `204` so callers cannot tell the two
/// apart.
pub async fn session(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    let Some(token) = extract_session_token(&headers) else {
        return StatusCode::NO_CONTENT.into_response();
    };
    match state.sessions().validate(&token).await {
        Some(record) => (
            StatusCode::OK,
            Json(SessionResponse {
                identity: record.identity,
                remember: record.remember,
            }),
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Build the `HttpOnly` cookie carrying a freshly issued session token.
///
/// The max-age was fixed by the store in the same operation that chose the
/// record's lifetime.
pub(super) fn session_cookie(created: &CreatedSession) -> Result<HeaderValue, InvalidHeaderValue> {
    let max_age = created.cookie_max_age.as_secs();
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
        created.token
    ))
}

pub(super) fn clear_session_cookie() -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
    ))
}

pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
