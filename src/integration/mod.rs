//! Integration testing module
//!
//! End-to-end tests for the stream proxy:
//! - Manifest fetch and rewrite through the router
//! - Following rewritten references back through the segment proxy
//! - Credential propagation to the origin

mod e2e;
pub mod fixtures;
