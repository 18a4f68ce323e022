//! Origin credentials carried on proxy URLs.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

use crate::target::encode_component;

/// Username/password pair forwarded to the origin as HTTP Basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Both parts must be present and non-empty, otherwise there are no credentials.
    pub fn from_params(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some(Self {
                username: u.to_string(),
                password: p.to_string(),
            }),
            _ => None,
        }
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", token)
    }

    /// `&u=..&p=..` suffix appended to rewritten proxy URLs.
    pub fn query_suffix(&self) -> String {
        format!(
            "&u={}&p={}",
            encode_component(&self.username),
            encode_component(&self.password)
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
