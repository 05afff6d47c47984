//! One-shot harvest against the arXiv query API.

use std::time::Duration;

use arvest_core::{FetchError, Record, SHARED_RUNTIME, http_client};

use crate::config::Config;
use crate::error::HarvestError;
use crate::parser;

/// Result of one harvest call
#[derive(Debug)]
pub struct Harvest {
    /// At most the requested page of records, ids non-empty and unique
    pub records: Vec<Record>,
    /// Source entries dropped during parsing
    pub skipped: usize,
}

/// Fetch one page of results for `query` and parse it into records.
///
/// Issues a single request (`start=0`) sorted by last update, newest
/// first. A non-2xx response or a network failure is fatal and carries no
/// partial results; no retries are attempted.
pub fn harvest(config: &Config, query: &str, page_size: usize) -> Result<Harvest, HarvestError> {
    let url = build_query_url(&config.base_url, query, page_size)?;
    log::debug!("GET {url}");

    let body = fetch_feed(url, config.timeout_secs)?;
    let parsed = parser::parse_feed(&body)?;

    let mut records = parsed.records;
    cap_page(&mut records, page_size);

    Ok(Harvest {
        records,
        skipped: parsed.skipped,
    })
}

/// Build the query URL for one page, newest updates first.
fn build_query_url(
    base_url: &str,
    query: &str,
    page_size: usize,
) -> Result<reqwest::Url, HarvestError> {
    let mut url = reqwest::Url::parse(base_url).map_err(|e| {
        HarvestError::Fetch(FetchError {
            status: None,
            message: format!("invalid base URL {base_url:?}: {e}"),
        })
    })?;
    url.query_pairs_mut()
        .append_pair("search_query", query)
        .append_pair("start", "0")
        .append_pair("max_results", &page_size.to_string())
        .append_pair("sortBy", "lastUpdatedDate")
        .append_pair("sortOrder", "descending");
    Ok(url)
}

/// GET the feed body with a bounded per-request timeout.
fn fetch_feed(url: reqwest::Url, timeout_secs: u64) -> Result<String, FetchError> {
    SHARED_RUNTIME.handle().block_on(async {
        let resp = http_client()
            .get(url)
            .timeout(Duration::from_secs(timeout_secs))
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError {
                status: Some(status.as_u16()),
                message: format!("arXiv query returned {status}"),
            });
        }

        resp.text().await.map_err(|e| FetchError::from_reqwest(&e))
    })
}

/// Sources may over-deliver; never hand more than the requested page on.
fn cap_page(records: &mut Vec<Record>, page_size: usize) {
    if records.len() > page_size {
        log::warn!(
            "Source returned {} entries for page size {page_size}, truncating",
            records.len()
        );
        records.truncate(page_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_url_has_all_parameters() {
        let url = build_query_url("http://export.arxiv.org/api/query", "machine learning", 10)
            .unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("search_query".into(), "machine learning".into())));
        assert!(pairs.contains(&("start".into(), "0".into())));
        assert!(pairs.contains(&("max_results".into(), "10".into())));
        assert!(pairs.contains(&("sortBy".into(), "lastUpdatedDate".into())));
        assert!(pairs.contains(&("sortOrder".into(), "descending".into())));
    }

    #[test]
    fn query_is_percent_encoded() {
        let url = build_query_url("http://export.arxiv.org/api/query", "cat:cs.LG AND deep", 5)
            .unwrap();
        assert!(url.as_str().contains("max_results=5"));
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn invalid_base_url_is_a_fetch_error() {
        let err = build_query_url("not a url", "x", 1).unwrap_err();
        assert!(matches!(err, HarvestError::Fetch(_)));
    }

    #[test]
    fn cap_page_truncates_overdelivery() {
        let record = |id: &str| Record {
            id: id.to_string(),
            title: "T".to_string(),
            summary: String::new(),
            authors: Vec::new(),
            updated: "2024-01-19T08:05:10Z".parse().unwrap(),
        };
        let mut records = vec![record("a"), record("b"), record("c")];
        cap_page(&mut records, 2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, "b");

        let mut few = vec![record("a")];
        cap_page(&mut few, 2);
        assert_eq!(few.len(), 1);
    }
}
