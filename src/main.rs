//! SentinelAI Stream Proxy
//!
//! Proxies HLS camera streams for the browser dashboard: fetches manifests
//! and segments from the origin media server with server-side Basic auth,
//! and rewrites manifests so every segment request comes back through
//! the proxy.

mod config;
mod config_file;
mod credentials;
mod error;
mod http;
#[cfg(test)]
mod integration;
mod playlist;
mod state;
mod target;
mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::http::create_router;
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "sentinel-stream-proxy";

#[tokio::main]
async fn main() -> Result<()> {
    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--print-config") {
        print!("{}", config_file::ConfigFile::default_config().to_toml()?);
        return Ok(());
    }

    // Load configuration
    let config_path = arg.unwrap_or_else(|| "config.toml".to_string());
    let loaded = config_file::load(&config_path);
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => ServerConfig::default(),
    };

    // Initialize logging
    init_logging(&config);

    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    if let Err(e) = loaded {
        tracing::warn!(
            "Failed to load config file {}: {}. Using defaults.",
            config_path,
            e
        );
    }
    tracing::info!("Configuration loaded: {:?}", config);

    // Create application state
    let state = Arc::new(AppState::new(config.clone())?);

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = config.socket_addr().parse()?;
    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize logging with tracing
fn init_logging(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "sentinel_stream_proxy={level},tower_http={level}",
            level = config.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    let fmt_layer = tracing_subscriber::fmt::layer();
    if config.json_logs() {
        registry.with(fmt_layer.json()).init();
    } else {
        registry.with(fmt_layer).init();
    }
}
