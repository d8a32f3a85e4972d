//! HTTP protocol layer module
//!
//! Protocol-level building blocks (MIME detection, cache validators,
//! range parsing, response builders) decoupled from the routing policy.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use range::parse_range_header;
pub use response::{
    build_304_response, build_404_response, build_405_response, build_416_response,
    build_options_response,
};
