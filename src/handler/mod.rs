//! Request handler module
//!
//! Routing dispatch plus the document and static asset handlers.

pub mod document;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
