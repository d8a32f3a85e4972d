//! HTTP cache control module
//!
//! `ETag` generation, conditional request handling, and the per-response
//! cache policy. Asset responses stay cacheable; fallback-document
//! responses for app routes must always be re-fetched.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from file content using fast hashing
#[must_use]
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if the client's `If-None-Match` header matches the server `ETag`
///
/// Handles single tags, comma-separated lists, and the `*` wildcard.
/// Returns true if matched (respond 304).
#[must_use]
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Cache policy applied per response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Default for static assets: cacheable with revalidation via `ETag`
    Asset,
    /// Root/app-state responses: defeat every cache layer
    NoStore,
}

impl CachePolicy {
    /// Cache-Control header value for this policy
    #[must_use]
    pub const fn cache_control(self) -> &'static str {
        match self {
            Self::Asset => "public, max-age=3600",
            Self::NoStore => "no-cache, no-store, must-revalidate",
        }
    }

    /// Whether the legacy `Pragma: no-cache` / `Expires: 0` pair must
    /// accompany the Cache-Control header
    #[must_use]
    pub const fn wants_legacy_no_cache_headers(self) -> bool {
        matches!(self, Self::NoStore)
    }
}
