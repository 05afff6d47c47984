//! Harvest-and-index pipeline
//!
//! Composes the harvester and the indexer into one sequential pass:
//! harvest a page of records, gate each one, upsert it into the store,
//! and report a run summary with per-record failures collected rather
//! than aborting the batch.

pub mod runner;
pub mod summary;

// Re-exports for convenience
pub use runner::{PipelineConfig, index_records, run};
pub use summary::{IndexOutcome, RunSummary};
