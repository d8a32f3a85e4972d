//! Static transfer layer
//!
//! Loads file bytes and builds responses. Owns content-type inference,
//! conditional requests, and range semantics; any failure to produce the
//! file (including a missing fallback document) maps to the standard 404
//! response for that single request.

use crate::handler::router::RequestContext;
use crate::http::cache::{self, CachePolicy};
use crate::http::range::RangeParseResult;
use crate::http::{self, mime, response};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve the routed target file under the given cache policy
pub async fn serve_path(
    ctx: &RequestContext<'_>,
    root: &Path,
    target: &Path,
    policy: CachePolicy,
) -> Response<Full<Bytes>> {
    match load_file(root, target).await {
        Some((content, content_type)) => build_file_response(ctx, &content, content_type, policy),
        None => http::build_404_response(),
    }
}

/// Load a file, confined to the serve root
///
/// The router already refuses dot-dot segments; canonicalization here is
/// the second check, covering symlinked escapes.
async fn load_file(root: &Path, target: &Path) -> Option<(Vec<u8>, &'static str)> {
    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Serve root inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    // A missing file is a routine miss, not worth a log line
    let target_canonical = target.canonicalize().ok()?;
    if !target_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path escapes serve root, refused: {}",
            target_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&target_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                target_canonical.display()
            ));
            return None;
        }
    };

    let content_type =
        mime::content_type_for(target_canonical.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Build the response for loaded file content
///
/// No-store responses always travel in full; validators and ranges only
/// apply to cacheable asset responses.
fn build_file_response(
    ctx: &RequestContext<'_>,
    data: &[u8],
    content_type: &str,
    policy: CachePolicy,
) -> Response<Full<Bytes>> {
    if policy.wants_legacy_no_cache_headers() {
        return response::build_full_response(
            Bytes::from(data.to_owned()),
            content_type,
            "",
            policy,
            ctx.is_head,
        );
    }

    let etag = cache::generate_etag(data);
    let total_size = data.len();

    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    match http::parse_range_header(ctx.range_header.as_deref(), total_size) {
        RangeParseResult::Valid(range) => {
            let start = range.start;
            let end = range.end_position(total_size);
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(data[start..=end].to_vec())
            };
            response::build_partial_response(
                body,
                content_type,
                &etag,
                start,
                end,
                total_size,
                ctx.is_head,
            )
        }
        RangeParseResult::NotSatisfiable => http::build_416_response(total_size),
        RangeParseResult::None => response::build_full_response(
            Bytes::from(data.to_owned()),
            content_type,
            &etag,
            policy,
            ctx.is_head,
        ),
    }
}
