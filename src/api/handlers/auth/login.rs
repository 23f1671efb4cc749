//! Login and logout endpoints.
//!
//! Flow Overview:
//! 1) Count the attempt in the ledger before anything else; a refused
//!    attempt never reaches the provider.
//! 2) Verify the provider credential (fail-closed on transport errors).
//!    A failed verification keeps its consumed attempt slot.
//! 3) Issue the session record and cookie in one operation and redirect to
//!    the zone overview.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::cloudflare::VerifyOutcome;

use super::error::AuthError;
use super::session::{clear_session_cookie, extract_session_token, session_cookie};
use super::state::AppState;
use super::utils::{normalize_identity, valid_identity};

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    email: String,
    api_key: String,
    #[serde(default)]
    remember: Option<String>,
}

/// `GET /login`. The login form itself is rendered by the home page.
pub async fn show_login() -> Redirect {
    Redirect::to("/")
}

/// `POST /login`
pub async fn login(
    state: Extension<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    let identity = normalize_identity(&form.email);

    if !state.ledger().check_and_increment(&identity).await {
        warn!("login refused: attempt limit reached");
        return login_failed(AuthError::RateLimitExceeded);
    }

    // Malformed identities take the same exit as a wrong key.
    if !valid_identity(&identity) {
        return login_failed(AuthError::InvalidCredential);
    }

    let credential = SecretString::from(form.api_key);
    if state.verifier().verify(&identity, &credential).await != VerifyOutcome::Valid {
        return login_failed(AuthError::InvalidCredential);
    }

    let remember = form.remember.as_deref() == Some("on");
    let created = match state
        .sessions()
        .create(&identity, credential, remember, state.config())
        .await
    {
        Ok(created) => created,
        Err(err) => {
            error!("Failed to issue session: {err}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Login failed".to_string())
                .into_response();
        }
    };
    let cookie = match session_cookie(&created) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Login failed".to_string())
                .into_response();
        }
    };

    info!("operator signed in");
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    (headers, Redirect::to("/zones")).into_response()
}

/// `GET /logout`. Destroys the session unconditionally.
pub async fn logout(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        state.sessions().destroy(&token).await;
    }

    // Always clear the cookie, even if the session record was missing.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie() {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (response_headers, Redirect::to("/")).into_response()
}

fn login_failed(err: AuthError) -> Response {
    Redirect::to(&format!("/?error={}", err.query_code())).into_response()
}
