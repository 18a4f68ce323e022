//! Application state
//!
//! Everything in here is built once at startup and never mutated; the
//! proxy handlers keep no per-stream or per-request state.

use crate::config::ServerConfig;
use crate::upstream::UpstreamClient;

/// Application state shared across all handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,

    /// Pooled client for the origin media server
    pub upstream: UpstreamClient,
}

impl AppState {
    /// Create a new AppState with the given configuration
    pub fn new(config: ServerConfig) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        Ok(Self { config, upstream })
    }
}
