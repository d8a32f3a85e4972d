//! Request handler module
//!
//! Request entry point plus the static transfer layer it delegates to.
//! The routing policy itself lives in [`crate::routing`] and stays
//! independently testable.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
