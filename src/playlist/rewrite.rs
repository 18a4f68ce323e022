//! Manifest rewriter
//!
//! Line-oriented rewrite of an `.m3u8` body. Lines are split on `\n` only;
//! a trailing `\r` is kept as part of the line terminator.

use url::Url;

use crate::credentials::Credentials;
use crate::error::ProcessingError;
use crate::target::{is_absolute, segment_proxy_url, ManifestBase};

/// Output of [`rewrite_playlist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenPlaylist {
    pub text: String,
    /// Number of lines that were media references.
    pub references: usize,
}

/// Directive, comment or blank line.
fn is_passthrough(line: &str) -> bool {
    line.starts_with('#') || line.trim().is_empty()
}

/// Rewrite every media reference in `manifest` into a segment proxy URL.
///
/// `manifest_url` is the URL the manifest was fetched from; relative
/// references resolve against its origin and directory.
pub fn rewrite_playlist(
    manifest: &str,
    manifest_url: &Url,
    credentials: Option<&Credentials>,
) -> Result<RewrittenPlaylist, ProcessingError> {
    // Only needed once a relative reference shows up.
    let mut base: Option<ManifestBase> = None;
    let mut references = 0;
    let mut lines = Vec::new();

    for line in manifest.split('\n') {
        if is_passthrough(line) {
            lines.push(line.to_string());
            continue;
        }
        references += 1;

        let (reference, eol) = match line.strip_suffix('\r') {
            Some(stripped) => (stripped, "\r"),
            None => (line, ""),
        };

        let absolute = if is_absolute(reference) {
            reference.to_string()
        } else {
            let base = match &mut base {
                Some(base) => base,
                slot => slot.insert(ManifestBase::from_url(manifest_url)?),
            };
            base.resolve(reference)
        };

        lines.push(format!("{}{}", segment_proxy_url(&absolute, credentials), eol));
    }

    Ok(RewrittenPlaylist {
        text: lines.join("\n"),
        references,
    })
}
