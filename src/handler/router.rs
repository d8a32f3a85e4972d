//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, the
//! file-vs-fallback decision, delegation to the static transfer layer,
//! and access-log emission.

use crate::config::Config;
use crate::handler::static_files;
use crate::http;
use crate::http::cache::CachePolicy;
use crate::logger::{self, AccessLogEntry};
use crate::routing;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating what the static layer needs
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
///
/// Never fails: every outcome, including per-request file errors, is a
/// plain HTTP response.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    config: Arc<Config>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path();
    let query = uri.query();
    let is_head = method == Method::HEAD;

    let response = match check_http_method(&method) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path,
                query,
                is_head,
                if_none_match: header_string(&req, "if-none-match"),
                range_header: header_string(&req, "range"),
            };
            respond(&ctx, &config).await
        }
    };

    if config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path_and_query()
                .map_or_else(|| path.to_string(), ToString::to_string),
        );
        entry.http_version = version_str(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_bytes_sent(&response);
        logger::log_access(&entry);
    }

    Ok(response)
}

/// Produce the response for a validated GET/HEAD request
///
/// Classification and the file-vs-fallback decision are pure; the cache
/// policy keys off the request's category, not off whether the fallback
/// was substituted, so a missing asset falls back yet stays cacheable.
pub async fn respond(ctx: &RequestContext<'_>, config: &Config) -> Response<Full<Bytes>> {
    let category = routing::classify(ctx.path, ctx.query);
    let decision = routing::decide(
        category,
        ctx.path,
        config.serve_root(),
        &config.serve.fallback,
    );
    let policy = if category.wants_no_cache() {
        CachePolicy::NoStore
    } else {
        CachePolicy::Asset
    };

    static_files::serve_path(ctx, config.serve_root(), decision.target(), policy).await
}

/// Check HTTP method and return an early response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        _ => "1.1",
    }
}

/// Bytes actually sent in the body, not the advertised entity size.
/// HEAD responses keep their Content-Length header but log 0 here.
fn body_bytes_sent(response: &Response<Full<Bytes>>) -> usize {
    use hyper::body::Body;

    usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoggingConfig, PerformanceConfig, ServeConfig, ServerConfig};
    use http_body_util::BodyExt;
    use std::fs;
    use std::path::PathBuf;

    const INDEX_HTML: &str = "<html>spa shell</html>";
    const LOGO_BYTES: &[u8] = b"not-really-a-png";

    /// Serve root with `index.html` and `assets/logo.png`
    fn fixture_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir()
            .join("spa-serve-handler-tests")
            .join(format!("{}-{}", name, std::process::id()));
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::write(root.join("index.html"), INDEX_HTML).unwrap();
        fs::write(root.join("assets/logo.png"), LOGO_BYTES).unwrap();
        root
    }

    fn fixture_config(root: &std::path::Path) -> Config {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                workers: None,
            },
            serve: ServeConfig {
                root: root.to_string_lossy().into_owned(),
                fallback: "index.html".to_string(),
            },
            logging: LoggingConfig {
                access_log: false,
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
            },
        }
    }

    fn get_ctx(path: &'static str, query: Option<&'static str>) -> RequestContext<'static> {
        RequestContext {
            path,
            query,
            is_head: false,
            if_none_match: None,
            range_header: None,
        }
    }

    async fn body_bytes(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_existing_asset_served_verbatim() {
        let root = fixture_root("asset");
        let config = fixture_config(&root);

        let response = respond(&get_ctx("/assets/logo.png", None), &config).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Type"], "image/png");
        assert_eq!(response.headers()["Cache-Control"], "public, max-age=3600");
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(body_bytes(response).await.as_ref(), LOGO_BYTES);
    }

    #[tokio::test]
    async fn test_app_state_route_gets_fallback_no_cache() {
        let root = fixture_root("app-state");
        let config = fixture_config(&root);

        let response = respond(&get_ctx("/stats", None), &config).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["Cache-Control"],
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(response.headers()["Pragma"], "no-cache");
        assert_eq!(response.headers()["Expires"], "0");
        assert_eq!(body_bytes(response).await.as_ref(), INDEX_HTML.as_bytes());
    }

    #[tokio::test]
    async fn test_root_with_query_gets_fallback_no_cache() {
        let root = fixture_root("root-query");
        let config = fixture_config(&root);

        let response = respond(&get_ctx("/", Some("qr_token=test123")), &config).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["Cache-Control"],
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(body_bytes(response).await.as_ref(), INDEX_HTML.as_bytes());
    }

    #[tokio::test]
    async fn test_missing_asset_falls_back_but_stays_cacheable() {
        let root = fixture_root("missing");
        let config = fixture_config(&root);

        let response = respond(&get_ctx("/missing/path.js", None), &config).await;
        assert_eq!(response.status(), 200);
        // Intentional asymmetry: fallback body, default cache headers
        assert_eq!(response.headers()["Cache-Control"], "public, max-age=3600");
        assert!(!response.headers().contains_key("Pragma"));
        assert_eq!(body_bytes(response).await.as_ref(), INDEX_HTML.as_bytes());
    }

    #[tokio::test]
    async fn test_missing_fallback_document_is_404() {
        let root = fixture_root("no-fallback");
        fs::remove_file(root.join("index.html")).unwrap();
        let config = fixture_config(&root);

        let response = respond(&get_ctx("/", None), &config).await;
        assert_eq!(response.status(), 404);
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
    }

    #[tokio::test]
    async fn test_head_request_has_empty_body() {
        let root = fixture_root("head");
        let config = fixture_config(&root);

        let ctx = RequestContext {
            is_head: true,
            ..get_ctx("/assets/logo.png", None)
        };
        let response = respond(&ctx, &config).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["Content-Length"],
            LOGO_BYTES.len().to_string().as_str()
        );
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_asset_etag_revalidation() {
        let root = fixture_root("etag");
        let config = fixture_config(&root);

        let first = respond(&get_ctx("/assets/logo.png", None), &config).await;
        let etag = first.headers()["ETag"].to_str().unwrap().to_string();

        let ctx = RequestContext {
            if_none_match: Some(etag),
            ..get_ctx("/assets/logo.png", None)
        };
        let second = respond(&ctx, &config).await;
        assert_eq!(second.status(), 304);
    }

    #[tokio::test]
    async fn test_asset_range_request() {
        let root = fixture_root("range");
        let config = fixture_config(&root);

        let ctx = RequestContext {
            range_header: Some("bytes=0-2".to_string()),
            ..get_ctx("/assets/logo.png", None)
        };
        let response = respond(&ctx, &config).await;
        assert_eq!(response.status(), 206);
        assert_eq!(body_bytes(response).await.as_ref(), &LOGO_BYTES[0..=2]);
    }

    #[tokio::test]
    async fn test_suffix_range_on_empty_asset_is_416() {
        let root = fixture_root("empty-range");
        fs::write(root.join("assets/empty.js"), b"").unwrap();
        let config = fixture_config(&root);

        let ctx = RequestContext {
            range_header: Some("bytes=-1".to_string()),
            ..get_ctx("/assets/empty.js", None)
        };
        let response = respond(&ctx, &config).await;
        assert_eq!(response.status(), 416);
        assert_eq!(response.headers()["Content-Range"], "bytes */0");
    }

    #[test]
    fn test_logged_bytes_track_body_not_entity() {
        let full = crate::http::response::build_full_response(
            Bytes::from("12345"),
            "text/plain",
            "\"e\"",
            CachePolicy::Asset,
            false,
        );
        assert_eq!(body_bytes_sent(&full), 5);

        let head = crate::http::response::build_full_response(
            Bytes::from("12345"),
            "text/plain",
            "\"e\"",
            CachePolicy::Asset,
            true,
        );
        // Content-Length still advertises the entity size
        assert_eq!(head.headers()["Content-Length"], "5");
        assert_eq!(body_bytes_sent(&head), 0);
    }

    #[test]
    fn test_method_check() {
        assert!(check_http_method(&Method::GET).is_none());
        assert!(check_http_method(&Method::HEAD).is_none());
        assert_eq!(
            check_http_method(&Method::OPTIONS).unwrap().status(),
            204
        );
        assert_eq!(check_http_method(&Method::POST).unwrap().status(), 405);
    }
}
