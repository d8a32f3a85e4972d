//! HTTP response building module
//!
//! Builders for the status codes the server emits. Every builder routes
//! through [`cors`], so the permissive cross-origin headers are an
//! invariant of every response regardless of path or outcome.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::cache::CachePolicy;

/// Attach the permissive CORS headers used for local testing across
/// devices and ports. Not a production security posture.
fn cors(builder: hyper::http::response::Builder) -> hyper::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "*")
}

/// Build 304 Not Modified response
#[must_use]
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    cors(Response::builder())
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", CachePolicy::Asset.cache_control())
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
#[must_use]
pub fn build_404_response() -> Response<Full<Bytes>> {
    cors(Response::builder())
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
#[must_use]
pub fn build_405_response() -> Response<Full<Bytes>> {
    cors(Response::builder())
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (CORS preflight)
#[must_use]
pub fn build_options_response() -> Response<Full<Bytes>> {
    cors(Response::builder())
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 416 Range Not Satisfiable response
#[must_use]
pub fn build_416_response(file_size: usize) -> Response<Full<Bytes>> {
    cors(Response::builder())
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("Range Not Satisfiable")))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Full::new(Bytes::from("Range Not Satisfiable")))
        })
}

/// Build a full-content 200 response under the given cache policy
///
/// Asset responses get `ETag`/`Accept-Ranges` so revalidation and range
/// requests work. No-store responses get the cache-defeating trio and no
/// validators; those documents must always travel in full.
#[must_use]
pub fn build_full_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    policy: CachePolicy,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let mut builder = cors(Response::builder())
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Cache-Control", policy.cache_control());

    if policy.wants_legacy_no_cache_headers() {
        builder = builder.header("Pragma", "no-cache").header("Expires", "0");
    } else {
        builder = builder
            .header("Accept-Ranges", "bytes")
            .header("ETag", etag);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 206 Partial Content response for an asset range request
#[must_use]
pub fn build_partial_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    start: usize,
    end: usize,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = end - start + 1;
    let body = if is_head { Bytes::new() } else { data };

    cors(Response::builder())
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Content-Range", format!("bytes {start}-{end}/{total_size}"))
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", CachePolicy::Asset.cache_control())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("206", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
