//! HTTP client for the origin media server.

use axum::http::{HeaderValue, StatusCode};
use bytes::Bytes;
use reqwest::{redirect, Client};

use crate::config::UpstreamConfig;
use crate::credentials::Credentials;
use crate::error::ProcessingError;

/// A fully-read upstream response.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    /// Status text as sent by the origin, else the canonical phrase.
    pub reason: String,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as text, invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Shared, cloneable client. One connection pool for all requests.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    http: Client,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let redirect_policy = if config.follow_redirects {
            redirect::Policy::default()
        } else {
            redirect::Policy::none()
        };

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(redirect_policy);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
        })
    }

    /// GET `target`, with Basic auth when credentials are given.
    ///
    /// Non-2xx responses are returned as-is; only transport failures are errors.
    pub async fn fetch(
        &self,
        target: &str,
        credentials: Option<&Credentials>,
    ) -> Result<UpstreamResponse, ProcessingError> {
        let mut req = self.http.get(target);
        if let Some(creds) = credentials {
            req = req.header(reqwest::header::AUTHORIZATION, creds.authorization());
        }

        let res = req.send().await?;

        // reqwest and axum sit on different `http` major versions.
        let status =
            StatusCode::from_u16(res.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        let reason = reason_phrase(&res);
        let content_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| HeaderValue::from_bytes(v.as_bytes()).ok());

        if !status.is_success() {
            return Ok(UpstreamResponse {
                status,
                reason,
                content_type,
                body: Bytes::new(),
            });
        }

        let body = res.bytes().await?;
        tracing::debug!("Fetched {} bytes from upstream ({})", body.len(), status);

        Ok(UpstreamResponse {
            status,
            reason,
            content_type,
            body,
        })
    }
}

/// hyper records the reason phrase only when it differs from the canonical one.
fn reason_phrase(res: &reqwest::Response) -> String {
    match res.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => res.status().canonical_reason().unwrap_or("").to_string(),
    }
}
