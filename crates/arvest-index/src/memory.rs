//! In-process store for tests and offline runs.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use arvest_core::Record;
use serde_json::Value;

use crate::error::IndexError;
use crate::store::SearchStore;

/// HashMap-backed `SearchStore`.
///
/// Documents live as the same JSON value the real store would receive.
/// Individual ids can be armed to fail their upserts, so batch error
/// handling is testable without a live store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// index name -> document id -> stored document
    indices: Mutex<HashMap<String, HashMap<String, Value>>>,
    /// ids whose upserts fail with a `Store` error
    fail_ids: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm upserts of `id` to fail.
    pub fn fail_upserts_for(&self, id: &str) {
        self.fail_ids.lock().unwrap().insert(id.to_string());
    }

    pub fn has_index(&self, index: &str) -> bool {
        self.indices.lock().unwrap().contains_key(index)
    }

    pub fn document_count(&self, index: &str) -> usize {
        self.indices
            .lock()
            .unwrap()
            .get(index)
            .map_or(0, HashMap::len)
    }

    /// The stored document for `id`, if any.
    pub fn document(&self, index: &str, id: &str) -> Option<Value> {
        self.indices
            .lock()
            .unwrap()
            .get(index)
            .and_then(|docs| docs.get(id))
            .cloned()
    }
}

impl SearchStore for MemoryStore {
    /// Creating an index that exists keeps its documents.
    fn ensure_schema(&self, index: &str, _schema: &Value) -> Result<(), IndexError> {
        self.indices
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default();
        Ok(())
    }

    /// Full overwrite by id; the index is created on first write, the way
    /// the real store auto-creates on document writes.
    fn upsert(&self, index: &str, record: &Record) -> Result<(), IndexError> {
        if self.fail_ids.lock().unwrap().contains(&record.id) {
            return Err(IndexError::store(&record.id, "injected failure"));
        }

        let doc = serde_json::to_value(record)
            .map_err(|e| IndexError::store(&record.id, e.to_string()))?;
        self.indices
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default()
            .insert(record.id.clone(), doc);
        Ok(())
    }

    fn delete_index(&self, index: &str) -> Result<(), IndexError> {
        self.indices.lock().unwrap().remove(index);
        Ok(())
    }
}
