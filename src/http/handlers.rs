//! Service endpoints that don't touch the origin.

use axum::{http::StatusCode, Json};

/// Health check endpoint
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Version information endpoint
pub async fn version_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "online",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Status endpoint polled by the dashboard
pub async fn api_status() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
