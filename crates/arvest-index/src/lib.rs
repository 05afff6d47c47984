//! Searchable store indexing
//!
//! Provides the `SearchStore` capability the pipeline writes through:
//! idempotent schema creation and full-overwrite document upserts keyed
//! on the record id. Two implementations: `OpenSearchStore` over the
//! OpenSearch REST API, and `MemoryStore` for tests and local runs.

pub mod error;
pub mod memory;
pub mod opensearch;
pub mod query;
pub mod schema;
pub mod store;

// Re-exports for convenience
pub use error::IndexError;
pub use memory::MemoryStore;
pub use opensearch::OpenSearchStore;
pub use query::SearchParams;
pub use schema::{DEFAULT_INDEX, index_settings};
pub use store::{SearchHit, SearchStore};
