//! Arvest Core - Common infrastructure for the harvest pipeline
//!
//! This crate provides the canonical record model plus the HTTP and
//! logging plumbing shared by the harvester, indexer, and CLI.

pub mod http;
pub mod logging;
pub mod record;

// Re-exports for convenience
pub use http::{FetchError, SHARED_RUNTIME, http_client};
pub use logging::init_logging;
pub use record::Record;
