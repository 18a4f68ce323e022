use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;
use thiserror::Error;

/// Which kind of upstream object a request was proxying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Playlist,
    Segment,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Resource::Playlist => write!(f, "playlist"),
            Resource::Segment => write!(f, "segment"),
        }
    }
}

/// Request-level error returned by the stream proxy handlers.
///
/// The `Display` text is exactly what the client sees in the `error`
/// field of the JSON body.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Missing target URL")]
    MissingTarget,

    #[error("Failed to fetch {resource}: {reason}")]
    UpstreamFetchFailed {
        resource: Resource,
        status: StatusCode,
        reason: String,
    },

    #[error("Failed to process {resource}")]
    ProcessingFailed {
        resource: Resource,
        #[source]
        source: ProcessingError,
    },
}

/// Anything that goes wrong between decoding the target and producing output.
///
/// Never sent to the client; only logged.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("malformed percent-escape in target: {0}")]
    MalformedEscape(String),

    #[error("target is not valid UTF-8 after decoding: {0}")]
    TargetEncoding(#[from] std::str::Utf8Error),

    #[error("invalid target URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("target URL has no usable origin: {0}")]
    OpaqueOrigin(String),

    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ProxyError {
    pub fn processing(resource: Resource, source: impl Into<ProcessingError>) -> Self {
        ProxyError::ProcessingFailed {
            resource,
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingTarget => StatusCode::BAD_REQUEST,
            ProxyError::UpstreamFetchFailed { status, .. } => *status,
            ProxyError::ProcessingFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match &self {
            ProxyError::MissingTarget => {}
            ProxyError::UpstreamFetchFailed {
                resource, status, ..
            } => tracing::warn!("Upstream {} fetch returned {}", resource, status),
            ProxyError::ProcessingFailed { resource, source } => {
                tracing::error!("Error processing {}: {}", resource, source)
            }
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

/// Errors that stop the server from starting.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid listen address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for startup code.
pub type Result<T> = std::result::Result<T, ServerError>;
