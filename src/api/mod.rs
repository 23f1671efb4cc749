//! HTTP surface of the console: router wiring, middleware layers, and the
//! server lifecycle.

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    http::{HeaderName, HeaderValue},
    middleware::{self, Next},
    routing::get,
    Extension, Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::watch};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

pub mod handlers;
pub mod sweeper;

use crate::cloudflare::CloudflareVerifier;
use crate::probe::{HickoryExchange, ModeProber};
use handlers::auth::{self, gate::require_session, AppState, RouteClass};

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Build the console router over shared state.
///
/// Protected routes are split into an interactive and a programmatic group;
/// each group's gate is created here, at registration time, with its caller
/// class baked in.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    let interactive_state = state.clone();
    let interactive = Router::new()
        .route("/zones", get(handlers::zones::overview))
        .route_layer(middleware::from_fn(move |request: Request, next: Next| {
            require_session(
                interactive_state.clone(),
                RouteClass::Interactive,
                request,
                next,
            )
        }));

    let programmatic_state = state.clone();
    let programmatic = Router::new()
        .route("/api/zones/delegation", get(handlers::zones::delegation))
        .route_layer(middleware::from_fn(move |request: Request, next: Next| {
            require_session(
                programmatic_state.clone(),
                RouteClass::Programmatic,
                request,
                next,
            )
        }));

    Router::new()
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::health::health))
        .route(
            "/login",
            get(auth::login::show_login).post(auth::login::login),
        )
        .route("/logout", get(auth::login::logout))
        .route("/api/session", get(auth::session::session))
        .merge(interactive)
        .merge(programmatic)
        .layer(Extension(state))
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, config: auth::AuthConfig) -> Result<()> {
    let verifier = Arc::new(CloudflareVerifier::new()?);
    let prober = ModeProber::new(Arc::new(HickoryExchange::new()));
    let state = Arc::new(AppState::new(config, verifier, prober));

    // Expired attempt and session records are reaped on a fixed cadence,
    // independent of request traffic.
    let (stop_tx, stop_rx) = watch::channel(false);
    let sweeper = sweeper::spawn(state.clone(), state.config().sweep_interval(), stop_rx);

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span)),
    );

    let listener = TcpListener::bind(format!("::0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The sweeper is stopped before exit so no task outlives the server.
    let _ = stop_tx.send(true);
    let _ = sweeper.await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Gracefully shutdown");
}

fn make_span(request: &axum::http::Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
