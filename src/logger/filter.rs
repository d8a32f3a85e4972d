//! Access log filter module
//!
//! A web build fetches dozens of engine and asset files per page load;
//! logging them drowns out the requests an operator actually watches for.
//! The filter is a pure predicate over the formatted request line.

/// Request-line prefixes that are always logged
const ALLOW_PREFIXES: [&str; 2] = ["GET /stats", "GET /?"];

/// Request-line prefixes that are suppressed (high-volume asset noise)
const DENY_PREFIXES: [&str; 2] = ["GET /assets", "GET /canvaskit"];

/// Decide whether an access-log line should be emitted
///
/// The allow-list is checked first and short-circuits, so an app-state
/// request is logged even if a deny prefix would also match. Everything
/// not covered by either list is logged (default-allow).
#[must_use]
pub fn should_log(request_line: &str) -> bool {
    if ALLOW_PREFIXES.iter().any(|p| request_line.starts_with(p)) {
        return true;
    }
    !DENY_PREFIXES.iter().any(|p| request_line.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_requests_are_logged() {
        assert!(should_log("GET /stats HTTP/1.1"));
        assert!(should_log("GET /stats/daily HTTP/1.1"));
        assert!(should_log("GET /?qr_token=x HTTP/1.1"));
    }

    #[test]
    fn test_asset_noise_is_suppressed() {
        assert!(!should_log("GET /assets/app.js HTTP/1.1"));
        assert!(!should_log("GET /canvaskit/skwasm.js HTTP/1.1"));
    }

    #[test]
    fn test_default_allow() {
        assert!(should_log("GET /favicon.ico HTTP/1.1"));
        assert!(should_log("GET / HTTP/1.1"));
        assert!(should_log("POST /anything HTTP/1.1"));
    }

    #[test]
    fn test_deny_only_applies_to_get() {
        // Deny prefixes include the method token, so other methods on
        // the same paths still log
        assert!(should_log("HEAD /assets/app.js HTTP/1.1"));
    }
}
