//! HTTP protocol layer module
//!
//! Status-code response builders, MIME detection, ETag and Range
//! handling, decoupled from the document and static-file handlers.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used builders
pub use range::parse_range_header;
pub use response::{
    build_404_response, build_405_response, build_413_response, build_416_response,
    build_500_response, build_ok_response, build_text_response,
};
