//! Request-boundary session gate for protected routes.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use super::principal::Principal;
use super::session::extract_session_token;
use super::state::AppState;

/// Caller class of a route, fixed when the route is registered.
///
/// The failure shape is decided by this tag alone, never by inspecting the
/// failing request's path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    /// Browser-facing route; failures redirect to the login entry point.
    Interactive,
    /// Machine-facing route; failures answer with a structured `401`.
    Programmatic,
}

/// Resolve the request's session or reject it according to `class`.
///
/// On success the operator's [`Principal`] is inserted into the request
/// extensions for downstream handlers.
pub async fn require_session(
    state: Arc<AppState>,
    class: RouteClass,
    mut request: Request,
    next: Next,
) -> Response {
    let session = match extract_session_token(request.headers()) {
        Some(token) => state.sessions().validate(&token).await,
        None => None,
    };

    match session {
        Some(session) => {
            request.extensions_mut().insert(Principal {
                identity: session.identity,
                credential: session.credential,
            });
            next.run(request).await
        }
        None => reject(class),
    }
}

fn reject(class: RouteClass) -> Response {
    match class {
        RouteClass::Interactive => Redirect::to("/login").into_response(),
        RouteClass::Programmatic => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "unauthenticated"})),
        )
            .into_response(),
    }
}
