//! Route definitions

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode},
    routing::get,
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::list_routes))
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Climate API (v1.0); static segments take precedence over `{start}`
        .route("/api/v1.0/precipitation", get(handlers::climate::precipitation))
        .route("/api/v1.0/stations", get(handlers::climate::stations))
        .route("/api/v1.0/tobs", get(handlers::climate::tobs))
        .route("/api/v1.0/{start}", get(handlers::climate::stats_from))
        .route("/api/v1.0/{start}/{end}", get(handlers::climate::stats_between))
        // Attach state
        .with_state(state)
}

/// Wrap the router in the request timeout, tracing, CORS and request ID layers
pub fn with_middleware(router: Router, server: &ServerConfig) -> Router {
    // Last added = outermost
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.allowed_origins))
        .layer(RequestIdLayer::new())
}

/// GET-only CORS; an empty origin list allows any origin
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET]);
    if allowed_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
