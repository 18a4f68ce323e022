//! Target URL handling: query parameters, decoding, resolution and the
//! shape of segment proxy URLs.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::{form_urlencoded, Url};

use crate::credentials::Credentials;
use crate::error::ProcessingError;

/// Path of the segment proxy endpoint.
pub const SEGMENT_PATH: &str = "/api/stream/segment";

/// Path of the playlist proxy endpoint.
pub const PLAYLIST_PATH: &str = "/api/stream/playlist";

/// Characters left alone by JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single query component.
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Query parameters accepted by both proxy endpoints.
#[derive(Debug, Default)]
pub struct ProxyParams {
    pub target: Option<String>,
    pub u: Option<String>,
    pub p: Option<String>,
}

impl ProxyParams {
    /// Parse a raw query string. The first occurrence of a key wins and
    /// unknown keys are ignored.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(query) = query else {
            return params;
        };
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "target" => &mut params.target,
                "u" => &mut params.u,
                "p" => &mut params.p,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// The raw target, if one was given.
    pub fn raw_target(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| !t.is_empty())
    }

    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_params(self.u.as_deref(), self.p.as_deref())
    }
}

/// Decode the target once more on top of query-string decoding.
///
/// Every `%` must start a two-digit hex escape.
pub fn decode_target(raw: &str) -> Result<String, ProcessingError> {
    let bytes = raw.as_bytes();
    let malformed = bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    });
    if malformed {
        return Err(ProcessingError::MalformedEscape(raw.to_string()));
    }
    Ok(percent_decode_str(raw).decode_utf8()?.into_owned())
}

/// Origin and directory of a manifest URL, used to resolve relative references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestBase {
    /// `scheme://host[:port]`, default ports omitted.
    origin: String,
    /// Path up to and including the last `/`.
    dir: String,
}

impl ManifestBase {
    pub fn from_url(url: &Url) -> Result<Self, ProcessingError> {
        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(ProcessingError::OpaqueOrigin(url.to_string()));
        }
        let path = url.path();
        let dir = match path.rfind('/') {
            Some(i) => &path[..=i],
            None => "/",
        };
        Ok(Self {
            origin: origin.ascii_serialization(),
            dir: dir.to_string(),
        })
    }

    /// Turn a playlist reference into an absolute URL.
    pub fn resolve(&self, reference: &str) -> String {
        if is_absolute(reference) {
            reference.to_string()
        } else if reference.starts_with('/') {
            format!("{}{}", self.origin, reference)
        } else {
            format!("{}{}{}", self.origin, self.dir, reference)
        }
    }
}

pub fn is_absolute(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Build the proxy-relative URL that routes `target` through the segment proxy.
pub fn segment_proxy_url(target: &str, credentials: Option<&Credentials>) -> String {
    let mut out = format!("{}?target={}", SEGMENT_PATH, encode_component(target));
    if let Some(creds) = credentials {
        out.push_str(&creds.query_suffix());
    }
    out
}
