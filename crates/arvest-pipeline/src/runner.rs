//! Main runner for the harvest-and-index pipeline

use std::time::Instant;

use anyhow::{Context, Result};

use arvest_core::Record;
use arvest_index::{IndexError, SearchStore, index_settings};

use crate::summary::{IndexOutcome, RunSummary};

/// One pipeline run: what to harvest and where to put it.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub harvester: arvest_arxiv::Config,
    /// arXiv search query, e.g. `"machine learning"` or `"cat:cs.LG"`
    pub query: String,
    pub page_size: usize,
    /// Destination index name
    pub index: String,
    /// Drop the index before ensuring the schema
    pub reset: bool,
}

/// Run the pipeline: harvest one page and upsert every valid record.
///
/// Fetch and parse failures at the feed level are fatal, as are schema
/// and transport errors from the store. A single failed upsert is not:
/// its id lands in the summary and the batch continues.
pub fn run(config: &PipelineConfig, store: &dyn SearchStore) -> Result<RunSummary> {
    let start = Instant::now();

    if config.reset {
        log::info!("Resetting index {}", config.index);
        store
            .delete_index(&config.index)
            .context("Failed to delete index")?;
    }

    store
        .ensure_schema(&config.index, &index_settings())
        .context("Failed to ensure index schema")?;

    log::info!(
        "Harvesting {:?} (page size {})",
        config.query,
        config.page_size
    );
    let harvest = arvest_arxiv::harvest(&config.harvester, &config.query, config.page_size)
        .context("Harvest failed")?;
    log::info!(
        "Fetched {} records ({} entries skipped)",
        harvest.records.len(),
        harvest.skipped
    );

    let outcome = index_records(store, &config.index, &harvest.records)
        .context("Indexing aborted")?;

    let summary = RunSummary {
        query: config.query.clone(),
        requested: config.page_size,
        fetched: harvest.records.len(),
        skipped_entries: harvest.skipped,
        invalid_records: outcome.invalid,
        indexed: outcome.indexed,
        failed_ids: outcome.failed_ids,
        elapsed: start.elapsed(),
    };
    summary.log();
    Ok(summary)
}

/// Upsert a batch of records into `index`.
///
/// Records failing the validation gate are dropped, never stored
/// partially. Per-document `Store` errors are collected and the batch
/// continues; schema and transport errors abort.
pub fn index_records(
    store: &dyn SearchStore,
    index: &str,
    records: &[Record],
) -> Result<IndexOutcome, IndexError> {
    let mut outcome = IndexOutcome::default();

    for record in records {
        if let Err(reason) = record.validate() {
            log::warn!("Dropping invalid record {:?}: {reason}", record.id);
            outcome.invalid += 1;
            continue;
        }

        match store.upsert(index, record) {
            Ok(()) => outcome.indexed += 1,
            Err(IndexError::Store { id, message }) => {
                log::error!("Upsert of {id} failed: {message}");
                outcome.failed_ids.push(id);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(outcome)
}
