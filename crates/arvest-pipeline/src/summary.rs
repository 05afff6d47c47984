//! Run summary reporting.

use std::time::Duration;

use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

/// Outcome of indexing one batch.
#[derive(Debug, Default)]
pub struct IndexOutcome {
    /// Records upserted successfully
    pub indexed: usize,
    /// Records dropped by the validation gate
    pub invalid: usize,
    /// Ids whose upserts failed, in batch order
    pub failed_ids: Vec<String>,
}

/// Summary of one pipeline run.
#[derive(Debug)]
pub struct RunSummary {
    pub query: String,
    /// Page size requested from the source
    pub requested: usize,
    /// Records the harvest returned
    pub fetched: usize,
    /// Source entries dropped during parsing
    pub skipped_entries: usize,
    /// Records dropped by the validation gate
    pub invalid_records: usize,
    pub indexed: usize,
    pub failed_ids: Vec<String>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.failed_ids.is_empty()
    }

    /// Log a one-line completion message.
    pub fn log(&self) {
        log::info!(
            "Indexed {}/{} records for {:?} ({} skipped, {} invalid, {} failed) [{:.1}s]",
            self.indexed,
            self.fetched,
            self.query,
            self.skipped_entries,
            self.invalid_records,
            self.failed_ids.len(),
            self.elapsed.as_secs_f64()
        );
    }

    /// Format the summary as a table string.
    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Harvest Run").fg(Color::Cyan),
                Cell::new("Value").fg(Color::Cyan),
            ]);

        table.add_row(vec!["Query", &self.query]);
        table.add_row(vec!["Requested", &self.requested.to_string()]);
        table.add_row(vec!["Fetched", &self.fetched.to_string()]);
        table.add_row(vec!["Skipped entries", &self.skipped_entries.to_string()]);
        table.add_row(vec!["Invalid records", &self.invalid_records.to_string()]);
        table.add_row(vec!["Indexed", &self.indexed.to_string()]);
        table.add_row(vec![
            "Failed ids".to_string(),
            if self.failed_ids.is_empty() {
                "none".to_string()
            } else {
                self.failed_ids.join(", ")
            },
        ]);
        table.add_row(vec![
            "Elapsed".to_string(),
            format!("{:.1}s", self.elapsed.as_secs_f64()),
        ]);

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunSummary {
        RunSummary {
            query: "machine learning".to_string(),
            requested: 10,
            fetched: 8,
            skipped_entries: 2,
            invalid_records: 1,
            indexed: 6,
            failed_ids: vec!["2401.1v1".to_string()],
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn clean_run_has_no_failed_ids() {
        let mut summary = sample();
        assert!(!summary.is_clean());
        summary.failed_ids.clear();
        assert!(summary.is_clean());
    }

    #[test]
    fn table_lists_counts_and_failed_ids() {
        let rendered = sample().format_table();
        assert!(rendered.contains("machine learning"));
        assert!(rendered.contains("2401.1v1"));
        assert!(rendered.contains("1.5s"));
    }

    #[test]
    fn table_shows_none_when_clean() {
        let mut summary = sample();
        summary.failed_ids.clear();
        assert!(summary.format_table().contains("none"));
    }
}
