//! File-vs-fallback routing
//!
//! The core decision of the server: serve the requested file verbatim, or
//! substitute the fallback document so client-side routing can take over.
//! Everything here is a pure function of the request path and a filesystem
//! snapshot; there is no shared mutable state, so the decision is safe
//! under any concurrency model.

use std::path::{Path, PathBuf};

/// Request path classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCategory {
    /// Bare `/` with no query string
    Root,
    /// Client-side application routes: `/stats...`, or `/` carrying a query
    AppState,
    /// Anything else, resolved against the serve root
    Asset,
}

impl PathCategory {
    /// Whether responses for this category must defeat caches.
    ///
    /// The fallback document for app routes must always be re-fetched so
    /// updated client-routing logic is picked up. Asset paths keep the
    /// default cacheable policy even when they fall back.
    #[must_use]
    pub const fn wants_no_cache(self) -> bool {
        matches!(self, Self::Root | Self::AppState)
    }
}

/// Classify a request path.
///
/// Only a bare `/` carrying a query string counts as app-state; a query on
/// any other path does not qualify (`/foo?x=1` is an asset lookup for
/// `/foo`). Trailing slashes are not normalized.
#[must_use]
pub fn classify(path: &str, query: Option<&str>) -> PathCategory {
    if path == "/" {
        if query.is_some() {
            PathCategory::AppState
        } else {
            PathCategory::Root
        }
    } else if path.starts_with("/stats") {
        PathCategory::AppState
    } else {
        PathCategory::Asset
    }
}

/// Where the response body comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// The requested path resolved to a regular file under the serve root
    ServeAsIs(PathBuf),
    /// Substitute the fallback document
    ServeFallback(PathBuf),
}

impl RoutingDecision {
    /// The filesystem path to hand to the static transfer layer
    #[must_use]
    pub fn target(&self) -> &Path {
        match self {
            Self::ServeAsIs(p) | Self::ServeFallback(p) => p,
        }
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::ServeFallback(_))
    }
}

/// Decide what to serve for a classified request path.
///
/// Root and app-state paths take the fallback document without touching
/// the filesystem. Asset paths are stripped of the leading `/`, joined to
/// the serve root, and served as-is only when they name an existing
/// regular file (not a directory, not absent). Dot-dot segments never
/// reach the filesystem; they route to the fallback.
#[must_use]
pub fn decide(
    category: PathCategory,
    path: &str,
    root: &Path,
    fallback: &str,
) -> RoutingDecision {
    let fallback_path = root.join(fallback);

    if category.wants_no_cache() {
        return RoutingDecision::ServeFallback(fallback_path);
    }

    let relative = path.trim_start_matches('/');
    if relative.split('/').any(|segment| segment == "..") {
        return RoutingDecision::ServeFallback(fallback_path);
    }

    let candidate = root.join(relative);
    if candidate.is_file() {
        RoutingDecision::ServeAsIs(candidate)
    } else {
        RoutingDecision::ServeFallback(fallback_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Build a throwaway serve root containing `index.html` and
    /// `assets/logo.png`, namespaced per test to avoid collisions.
    fn fixture_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir()
            .join("spa-serve-routing-tests")
            .join(format!("{}-{}", name, std::process::id()));
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::write(root.join("index.html"), "<html>app</html>").unwrap();
        fs::write(root.join("assets/logo.png"), b"png-bytes").unwrap();
        root
    }

    #[test]
    fn test_classify_root() {
        assert_eq!(classify("/", None), PathCategory::Root);
    }

    #[test]
    fn test_classify_app_state() {
        assert_eq!(classify("/stats", None), PathCategory::AppState);
        assert_eq!(classify("/stats/daily", None), PathCategory::AppState);
        assert_eq!(classify("/", Some("qr_token=x")), PathCategory::AppState);
    }

    #[test]
    fn test_classify_asset() {
        assert_eq!(classify("/assets/app.js", None), PathCategory::Asset);
        assert_eq!(classify("/favicon.ico", None), PathCategory::Asset);
        // Query on a non-root path is not app-state
        assert_eq!(classify("/foo", Some("x=1")), PathCategory::Asset);
    }

    #[test]
    fn test_classify_trailing_slash_not_normalized() {
        assert_eq!(classify("/foo/", None), PathCategory::Asset);
        // Prefix match, not path-segment match
        assert_eq!(classify("/statsfoo", None), PathCategory::AppState);
    }

    #[test]
    fn test_decide_app_state_ignores_filesystem() {
        let root = fixture_root("app-state");
        // index.html exists, but even /stats pointing at nothing real
        // must fall back without a filesystem check
        let decision = decide(PathCategory::AppState, "/stats", &root, "index.html");
        assert_eq!(
            decision,
            RoutingDecision::ServeFallback(root.join("index.html"))
        );
    }

    #[test]
    fn test_decide_existing_asset_served_as_is() {
        let root = fixture_root("existing-asset");
        let decision = decide(
            PathCategory::Asset,
            "/assets/logo.png",
            &root,
            "index.html",
        );
        assert_eq!(
            decision,
            RoutingDecision::ServeAsIs(root.join("assets/logo.png"))
        );
    }

    #[test]
    fn test_decide_missing_asset_falls_back() {
        let root = fixture_root("missing-asset");
        let decision = decide(
            PathCategory::Asset,
            "/missing/path.js",
            &root,
            "index.html",
        );
        assert!(decision.is_fallback());
        assert_eq!(decision.target(), root.join("index.html"));
    }

    #[test]
    fn test_decide_directory_is_not_a_file() {
        let root = fixture_root("directory");
        let decision = decide(PathCategory::Asset, "/assets", &root, "index.html");
        assert!(decision.is_fallback());
    }

    #[test]
    fn test_decide_dot_dot_falls_back() {
        let root = fixture_root("traversal");
        let decision = decide(
            PathCategory::Asset,
            "/../secret.txt",
            &root,
            "index.html",
        );
        assert!(decision.is_fallback());
    }

    #[test]
    fn test_decide_is_idempotent() {
        let root = fixture_root("idempotent");
        let first = decide(
            PathCategory::Asset,
            "/assets/logo.png",
            &root,
            "index.html",
        );
        let second = decide(
            PathCategory::Asset,
            "/assets/logo.png",
            &root,
            "index.html",
        );
        assert_eq!(first, second);
    }
}
