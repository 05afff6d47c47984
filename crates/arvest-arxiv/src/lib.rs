//! arXiv metadata harvester
//!
//! Fetches one page of results from the arXiv query API and parses the
//! Atom response into normalized records.
//!
//! # Features
//!
//! - Single-request harvest: `start=0`, sorted by last update, newest first
//! - Per-entry error recovery: a malformed entry is skipped, not fatal
//! - Stable identifiers derived from the trailing segment of the entry URI
//!
//! # Example
//!
//! ```ignore
//! use arvest_arxiv::{Config, harvest};
//!
//! let config = Config::default();
//! let result = harvest(&config, "machine learning", 10)?;
//! for record in &result.records {
//!     println!("{}: {}", record.id, record.title);
//! }
//! ```

pub mod config;
pub mod error;
pub mod harvest;
pub mod parser;

// Re-exports for convenience
pub use config::Config;
pub use error::{HarvestError, ParseError};
pub use harvest::{Harvest, harvest};
pub use parser::{ParsedFeed, parse_feed};
