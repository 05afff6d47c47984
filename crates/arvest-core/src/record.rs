//! Canonical record model shared across the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized paper record.
///
/// `id` is the stable identifier downstream consumers join on; upserts are
/// keyed on it and overwrite every other field. Serializes directly into
/// the stored document shape (`updated` as RFC 3339).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable source identifier (trailing path segment of the entry id URI)
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Author names in source order
    pub authors: Vec<String>,
    /// Last-updated instant, normalized to UTC
    pub updated: DateTime<Utc>,
}

impl Record {
    /// Gate a record before indexing.
    ///
    /// `summary` may be empty text and `authors` may be an empty list;
    /// `id` and `title` must not be empty.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.id.is_empty() {
            return Err("empty id");
        }
        if self.title.is_empty() {
            return Err("empty title");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record {
            id: "2401.12345v2".to_string(),
            title: "Attention Is Not All You Need".to_string(),
            summary: "We revisit attention mechanisms.".to_string(),
            authors: vec!["Ada Lovelace".to_string(), "Charles Babbage".to_string()],
            updated: "2024-01-20T15:30:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn validate_accepts_complete_record() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_id() {
        let mut r = sample();
        r.id = String::new();
        assert_eq!(r.validate(), Err("empty id"));
    }

    #[test]
    fn validate_rejects_empty_title() {
        let mut r = sample();
        r.title = String::new();
        assert_eq!(r.validate(), Err("empty title"));
    }

    #[test]
    fn validate_allows_empty_summary_and_authors() {
        let mut r = sample();
        r.summary = String::new();
        r.authors.clear();
        assert!(r.validate().is_ok());
    }

    #[test]
    fn serializes_to_document_shape() {
        let doc = serde_json::to_value(sample()).unwrap();
        assert_eq!(doc["id"], "2401.12345v2");
        assert_eq!(doc["updated"], "2024-01-20T15:30:00Z");
        assert_eq!(doc["authors"][1], "Charles Babbage");
    }

    #[test]
    fn round_trips_through_json() {
        let r = sample();
        let doc = serde_json::to_value(&r).unwrap();
        let back: Record = serde_json::from_value(doc).unwrap();
        assert_eq!(back, r);
    }
}
