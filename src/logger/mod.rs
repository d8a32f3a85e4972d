//! Logger module
//!
//! Logging utilities for the dev server:
//! - Startup banner with reachable URLs
//! - Access logging in Common Log Format, with selective suppression
//! - Error and warning logging
//! - Optional file-based log targets

mod filter;
mod format;
pub mod writer;

pub use filter::should_log;
pub use format::AccessLogEntry;

use std::net::IpAddr;

use crate::config::Config;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Emit an access log entry, subject to the log filter
pub fn log_access(entry: &AccessLogEntry) {
    if filter::should_log(&entry.request_line()) {
        write_access(&entry.format_common());
    }
}

/// Startup banner listing reachable URLs for operator convenience
///
/// Not machine-parsed, not a stability contract.
pub fn log_server_start(config: &Config, local_ip: Option<IpAddr>) {
    let port = config.server.port;

    write_info("\n============================================================");
    write_info("SPA Dev Server");
    write_info("============================================================");
    write_info(&format!("Serving: {}", config.serve_root().display()));
    write_info("\nLocal URLs:");
    write_info(&format!("   http://localhost:{port}"));
    write_info(&format!("   http://127.0.0.1:{port}"));
    if let Some(ip) = local_ip {
        write_info("\nNetwork URLs (same Wi-Fi):");
        write_info(&format!("   http://{ip}:{port}"));
        write_info(&format!("   http://{ip}:{port}/stats"));
    }
    write_info("\nTest routes:");
    write_info(&format!("   http://localhost:{port}/"));
    write_info(&format!("   http://localhost:{port}/stats"));
    write_info(&format!("   http://localhost:{port}/?qr_token=test123"));
    write_info("\n============================================================");
    write_info("Press Ctrl+C to stop the server");
    write_info("============================================================\n");
}

pub fn log_shutdown() {
    write_info("\nServer stopped");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
