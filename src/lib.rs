//! Local development HTTP server for single-page web apps.
//!
//! Serves static build artifacts over HTTP and substitutes the app's root
//! document (`index.html`) for any path that does not name a real file, so
//! client-side routing keeps working on hard reloads and shared links.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
