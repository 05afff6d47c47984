//! OpenSearch-backed store.
//!
//! Async client bridged through the shared runtime so the single-threaded
//! pipeline sees plain sync calls.

use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use opensearch::indices::{IndicesCreateParts, IndicesDeleteParts};
use opensearch::{IndexParts, OpenSearch, SearchParts};
use serde_json::Value;
use url::Url;

use arvest_core::{Record, SHARED_RUNTIME};

use crate::error::IndexError;
use crate::store::{SearchHit, SearchStore};

/// Store implementation over the OpenSearch REST API.
#[derive(Debug)]
pub struct OpenSearchStore {
    client: OpenSearch,
}

impl OpenSearchStore {
    /// Connect to the store at `url` (e.g. `http://localhost:9200`).
    pub fn connect(url: &str) -> Result<Self, IndexError> {
        let parsed = Url::parse(url)
            .map_err(|e| IndexError::transport(format!("invalid store URL {url:?}: {e}")))?;

        let pool = SingleNodeConnectionPool::new(parsed);
        let transport = TransportBuilder::new(pool)
            .disable_proxy()
            .build()
            .map_err(|e| IndexError::transport(e.to_string()))?;

        log::debug!("Connected OpenSearch client to {url}");
        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Pass-through query-by-fields: run `query` against `index` and
    /// return ranked hits.
    pub fn search(&self, index: &str, query: &Value) -> Result<Vec<SearchHit>, IndexError> {
        let body = SHARED_RUNTIME.handle().block_on(async {
            let response = self
                .client
                .search(SearchParts::Index(&[index]))
                .body(query.clone())
                .send()
                .await
                .map_err(|e| IndexError::transport(e.to_string()))?;

            let status = response.status_code();
            if !status.is_success() {
                let error_body = response.text().await.unwrap_or_default();
                return Err(IndexError::transport(format!(
                    "search failed with status {status}: {error_body}"
                )));
            }

            response
                .json::<Value>()
                .await
                .map_err(|e| IndexError::transport(e.to_string()))
        })?;

        let hits = body["hits"]["hits"]
            .as_array()
            .map(|hits| hits.iter().filter_map(Self::parse_hit).collect())
            .unwrap_or_default();
        Ok(hits)
    }

    /// Extract one hit from the response; hits without an id are dropped.
    fn parse_hit(hit: &Value) -> Option<SearchHit> {
        let source = &hit["_source"];
        let id = source["id"].as_str()?;
        Some(SearchHit {
            id: id.to_string(),
            score: hit["_score"].as_f64().unwrap_or(0.0),
            title: source["title"].as_str().unwrap_or_default().to_string(),
            authors: source["authors"]
                .as_array()
                .map(|authors| {
                    authors
                        .iter()
                        .filter_map(|a| a.as_str())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            updated: source["updated"].as_str().unwrap_or_default().to_string(),
        })
    }
}

impl SearchStore for OpenSearchStore {
    /// Create the index with its mapping; an index that already exists is
    /// left untouched.
    fn ensure_schema(&self, index: &str, schema: &Value) -> Result<(), IndexError> {
        SHARED_RUNTIME.handle().block_on(async {
            let response = self
                .client
                .indices()
                .create(IndicesCreateParts::Index(index))
                .body(schema.clone())
                .send()
                .await
                .map_err(|e| IndexError::transport(e.to_string()))?;

            let status = response.status_code();
            if status.is_success() {
                log::info!("Created index {index}");
                return Ok(());
            }

            let error_body = response.text().await.unwrap_or_default();
            if error_body.contains("resource_already_exists_exception") {
                log::debug!("Index {index} already exists");
                return Ok(());
            }

            Err(IndexError::schema(format!(
                "create of {index} failed with status {status}: {error_body}"
            )))
        })
    }

    /// Index-document write: full overwrite of any document with this id.
    fn upsert(&self, index: &str, record: &Record) -> Result<(), IndexError> {
        let doc = serde_json::to_value(record)
            .map_err(|e| IndexError::store(&record.id, e.to_string()))?;

        SHARED_RUNTIME.handle().block_on(async {
            let response = self
                .client
                .index(IndexParts::IndexId(index, &record.id))
                .body(doc)
                .send()
                .await
                .map_err(|e| IndexError::transport(e.to_string()))?;

            let status = response.status_code();
            if !status.is_success() {
                let error_body = response.text().await.unwrap_or_default();
                return Err(IndexError::store(
                    &record.id,
                    format!("status {status}: {error_body}"),
                ));
            }

            log::debug!("Indexed {} into {index}", record.id);
            Ok(())
        })
    }

    /// Delete the index; a 404 means it was already gone.
    fn delete_index(&self, index: &str) -> Result<(), IndexError> {
        SHARED_RUNTIME.handle().block_on(async {
            let response = self
                .client
                .indices()
                .delete(IndicesDeleteParts::Index(&[index]))
                .send()
                .await
                .map_err(|e| IndexError::transport(e.to_string()))?;

            let status = response.status_code();
            if status.is_success() || status.as_u16() == 404 {
                log::debug!("Deleted index {index}");
                return Ok(());
            }

            let error_body = response.text().await.unwrap_or_default();
            Err(IndexError::schema(format!(
                "delete of {index} failed with status {status}: {error_body}"
            )))
        })
    }
}
