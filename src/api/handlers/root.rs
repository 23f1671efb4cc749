//! Root handler. The landing page with the login form is rendered by the
//! console frontend; the core only anchors the route.

use axum::response::IntoResponse;

use crate::api::APP_USER_AGENT;

pub async fn root() -> impl IntoResponse {
    APP_USER_AGENT
}
