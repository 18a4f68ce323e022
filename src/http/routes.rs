//! Axum router configuration

use axum::{
    body::Body,
    http::{header, Method, Request},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::target::{PLAYLIST_PATH, SEGMENT_PATH};

use super::handlers::{api_status, health_check, version_check};
use super::middleware::request_logger;
use super::stream::{playlist_proxy, segment_proxy};

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    // Spans carry the path only; the query holds origin credentials.
    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        tracing::debug_span!("request", method = %req.method(), path = %req.uri().path())
    });

    let router = Router::new()
        // Health and version endpoints
        .route("/health", get(health_check))
        .route("/version", get(version_check))
        .route("/api/status", get(api_status))
        // Stream proxy
        .route(PLAYLIST_PATH, get(playlist_proxy))
        .route(SEGMENT_PATH, get(segment_proxy))
        // Middleware
        .layer(middleware::from_fn(request_logger))
        .layer(trace);

    let router = if state.config.cors_enabled {
        router.layer(cors_layer())
    } else {
        router
    };

    router.with_state(state)
}

/// Browsers load the proxy from the dashboard origin, which may differ
/// (and may be a private-network address).
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([
            header::ACCEPT,
            header::RANGE,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .allow_private_network(true)
        .max_age(Duration::from_secs(3600))
}
