//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the stream proxy endpoints
//! - Playlist and segment proxy handlers
//! - Health, version and status endpoints
//! - Request logging and CORS middleware

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod stream;

pub use routes::create_router;
