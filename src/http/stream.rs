//! Stream proxy handlers
//!
//! `GET /api/stream/playlist` fetches a manifest and rewrites its media
//! references; `GET /api/stream/segment` passes segment bytes through.

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use url::Url;

use crate::error::{ProxyError, Resource};
use crate::playlist::rewrite_playlist;
use crate::state::AppState;
use crate::target::{decode_target, ProxyParams};
use crate::upstream::UpstreamResponse;

const MPEGURL: &str = "application/vnd.apple.mpegurl";
const OCTET_STREAM: &str = "application/octet-stream";

/// Live manifests describe a moving window and must never be cached.
const PLAYLIST_CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";
/// A segment URL's content never changes once published.
const SEGMENT_CACHE_CONTROL: &str = "public, max-age=3600";

/// Resolve the decoded target and fetch it.
async fn fetch_target(
    state: &AppState,
    params: &ProxyParams,
    resource: Resource,
) -> Result<(String, UpstreamResponse), ProxyError> {
    let raw = params.raw_target().ok_or(ProxyError::MissingTarget)?;
    let target = decode_target(raw).map_err(|e| ProxyError::processing(resource, e))?;
    let credentials = params.credentials();

    tracing::info!(
        "Proxying {} {} (auth: {})",
        resource,
        target,
        if credentials.is_some() { "yes" } else { "no" }
    );

    let upstream = state
        .upstream
        .fetch(&target, credentials.as_ref())
        .await
        .map_err(|e| ProxyError::processing(resource, e))?;

    if !upstream.is_success() {
        return Err(ProxyError::UpstreamFetchFailed {
            resource,
            status: upstream.status,
            reason: upstream.reason,
        });
    }

    Ok((target, upstream))
}

/// Playlist proxy endpoint
pub async fn playlist_proxy(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    let resource = Resource::Playlist;
    let params = ProxyParams::from_query(query.as_deref());
    let (target, upstream) = fetch_target(&state, &params, resource).await?;

    let manifest_url = Url::parse(&target).map_err(|e| ProxyError::processing(resource, e))?;
    let credentials = params.credentials();
    let rewritten = rewrite_playlist(&upstream.text(), &manifest_url, credentials.as_ref())
        .map_err(|e| ProxyError::processing(resource, e))?;

    tracing::debug!(
        "Rewrote {} playlist references from {}",
        rewritten.references,
        manifest_url.host_str().unwrap_or("")
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(MPEGURL));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(PLAYLIST_CACHE_CONTROL),
    );

    Ok((headers, rewritten.text).into_response())
}

/// Segment proxy endpoint
pub async fn segment_proxy(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    let params = ProxyParams::from_query(query.as_deref());
    let (_, upstream) = fetch_target(&state, &params, Resource::Segment).await?;

    let content_type = upstream
        .content_type
        .unwrap_or_else(|| HeaderValue::from_static(OCTET_STREAM));

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(SEGMENT_CACHE_CONTROL),
    );

    Ok((headers, upstream.body).into_response())
}
