//! Harvest subcommand - fetch one page from arXiv and index it

use anyhow::{Result, bail};
use clap::Args;

use arvest_index::OpenSearchStore;
use arvest_pipeline::PipelineConfig;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct HarvestArgs {
    /// arXiv search query, e.g. "machine learning" or "cat:cs.LG"
    pub query: String,

    /// Records to request (max_results)
    #[arg(short, long)]
    pub page_size: Option<usize>,

    /// Destination index name
    #[arg(short, long)]
    pub index: Option<String>,

    /// Delete the index before indexing (destructive)
    #[arg(long)]
    pub reset: bool,
}

pub fn run(args: HarvestArgs, config: &Config) -> Result<()> {
    let store = OpenSearchStore::connect(&config.store.url)?;

    let pipeline = PipelineConfig {
        harvester: (&config.arxiv).into(),
        query: args.query,
        page_size: args.page_size.unwrap_or(config.arxiv.page_size),
        index: args.index.unwrap_or_else(|| config.store.index.clone()),
        reset: args.reset,
    };

    let summary = arvest_pipeline::run(&pipeline, &store)?;
    eprintln!("\n{}", summary.format_table());

    if !summary.is_clean() {
        bail!("{} records failed to index", summary.failed_ids.len());
    }
    Ok(())
}
