//! Index schema for paper documents.

use serde_json::{Value, json};

/// Default destination index name
pub const DEFAULT_INDEX: &str = "papers";

/// Settings and mappings for the paper index.
///
/// `id` and `authors` are exact-match keys (authors multi-valued by the
/// store's list handling); `title` and `summary` are analyzed full text.
/// `fielddata` on `summary` keeps term-level access open for downstream
/// consumers of the index.
pub fn index_settings() -> Value {
    json!({
        "settings": {
            "index": {
                "number_of_shards": 1,
                "number_of_replicas": 0
            }
        },
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "title": { "type": "text", "analyzer": "english" },
                "summary": { "type": "text", "analyzer": "english", "fielddata": true },
                "authors": { "type": "keyword" },
                "updated": { "type": "date" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_are_single_shard_no_replicas() {
        let settings = index_settings();
        assert_eq!(settings["settings"]["index"]["number_of_shards"], 1);
        assert_eq!(settings["settings"]["index"]["number_of_replicas"], 0);
    }

    #[test]
    fn mapping_covers_every_record_field() {
        let settings = index_settings();
        let props = &settings["mappings"]["properties"];
        assert_eq!(props["id"]["type"], "keyword");
        assert_eq!(props["title"]["type"], "text");
        assert_eq!(props["title"]["analyzer"], "english");
        assert_eq!(props["summary"]["type"], "text");
        assert_eq!(props["summary"]["fielddata"], true);
        assert_eq!(props["authors"]["type"], "keyword");
        assert_eq!(props["updated"]["type"], "date");
    }

    #[test]
    fn default_index_name() {
        assert_eq!(DEFAULT_INDEX, "papers");
    }
}
