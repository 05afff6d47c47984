//! Search query builder.
//!
//! Every optional clause is applied independently; an author-only or
//! topic-only search gets its filter whether or not the other parameters
//! were supplied.

use serde_json::{Value, json};

/// Parameters for a pass-through paper search.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Keyword match on title and summary, all terms required
    pub query: Option<String>,
    /// Exact author name (matched lowercased against the keyword field)
    pub author: Option<String>,
    /// Topic terms matched against the summary, at least two required
    pub topic: Option<String>,
    /// Maximum hits to return
    pub limit: usize,
}

/// Build the search body from independent optional clauses.
///
/// With no clauses at all this is a `match_all`.
pub fn build_search_query(params: &SearchParams) -> Value {
    let mut must = Vec::new();

    if let Some(query) = &params.query {
        must.push(json!({
            "multi_match": {
                "query": query,
                "fields": ["title", "summary"],
                "operator": "and"
            }
        }));
    }

    if let Some(author) = &params.author {
        must.push(json!({
            "term": { "authors": author.to_lowercase() }
        }));
    }

    if let Some(topic) = &params.topic {
        must.push(json!({
            "match": {
                "summary": {
                    "query": topic,
                    "operator": "or",
                    "minimum_should_match": 2
                }
            }
        }));
    }

    let query = if must.is_empty() {
        json!({ "match_all": {} })
    } else {
        json!({ "bool": { "must": must } })
    };

    json!({ "query": query, "size": params.limit })
}
