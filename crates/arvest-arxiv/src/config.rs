//! Harvester configuration

/// Runtime configuration for the arXiv harvester
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for the arXiv query API
    pub base_url: String,
    /// Records requested per harvest (`max_results`)
    pub page_size: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://export.arxiv.org/api/query".to_string(),
            page_size: 10,
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.base_url.contains("export.arxiv.org"));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout_secs, 30);
    }
}
