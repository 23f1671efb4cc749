//! Zone views backed by the delegation prober.
//!
//! Zone listing and record CRUD talk straight to the provider API and live
//! outside this core; these handlers cover the signed-in landing route and
//! the delegation annotation used by zone detail views.

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::{AppState, Principal};

#[derive(Debug, Deserialize)]
pub(crate) struct DelegationQuery {
    hostname: String,
}

/// `GET /zones`. Signed-in landing route behind the interactive gate.
pub async fn overview(principal: Extension<Principal>) -> impl IntoResponse {
    format!("signed in as {}", principal.identity)
}

/// `GET /api/zones/delegation?hostname=…`
///
/// Classifies how a zone record is delegated at the provider edge. The probe
/// is advisory: whatever goes wrong on the wire, the answer is a result with
/// the affected family absent, never an error.
pub async fn delegation(
    state: Extension<Arc<AppState>>,
    query: Option<Query<DelegationQuery>>,
) -> impl IntoResponse {
    let Some(Query(query)) = query else {
        return (StatusCode::BAD_REQUEST, "Missing hostname".to_string()).into_response();
    };
    let hostname = query.hostname.trim();
    if hostname.is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing hostname".to_string()).into_response();
    }

    let result = state.prober().classify(hostname).await;
    (StatusCode::OK, Json(result)).into_response()
}
