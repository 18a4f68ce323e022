//! Playlist rewriting module
//!
//! Rewrites upstream HLS media playlists so that every media reference is
//! fetched back through the segment proxy:
//! - Directive and comment lines pass through untouched
//! - Relative references are resolved against the manifest URL
//! - Origin credentials are carried on every rewritten reference

pub mod rewrite;

pub use rewrite::rewrite_playlist;
