//! Liveness endpoint. The console has no external runtime dependencies to
//! ping; sessions and attempt counters live in process memory.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    name: String,
    version: String,
    status: String,
}

// axum handler for health
pub async fn health() -> impl IntoResponse {
    let health = Health {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "ok".to_string(),
    };

    (StatusCode::OK, Json(health))
}
