//! The store capability the pipeline writes through.

use arvest_core::Record;
use serde_json::Value;

use crate::error::IndexError;

/// Indexing capability over a searchable document store.
///
/// Implementations are handed to the pipeline as `&dyn SearchStore`;
/// nothing in the pipeline holds an ambient client. All three operations
/// are idempotent: creating an existing index and deleting an absent one
/// are no-ops, and repeating an upsert leaves exactly one document.
pub trait SearchStore {
    /// Create `index` with `schema` if it does not already exist.
    fn ensure_schema(&self, index: &str, schema: &Value) -> Result<(), IndexError>;

    /// Write one record addressed by its `id`, fully overwriting any
    /// existing document with that id.
    fn upsert(&self, index: &str, record: &Record) -> Result<(), IndexError>;

    /// Remove `index` and everything in it.
    fn delete_index(&self, index: &str) -> Result<(), IndexError>;
}

/// One ranked hit returned by a pass-through search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub score: f64,
    pub title: String,
    pub authors: Vec<String>,
    /// RFC 3339 string as stored
    pub updated: String,
}
