//! Search subcommand - canned queries against the paper index

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use arvest_index::{OpenSearchStore, SearchParams, query::build_search_query};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Keyword match on title and summary (all terms required)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Exact author name
    #[arg(short, long)]
    pub author: Option<String>,

    /// Topic terms matched against the summary
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Maximum hits to return
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Index to search
    #[arg(short, long)]
    pub index: Option<String>,
}

pub fn run(args: SearchArgs, config: &Config) -> Result<()> {
    let store = OpenSearchStore::connect(&config.store.url)?;
    let index = args.index.as_deref().unwrap_or(&config.store.index);

    let params = SearchParams {
        query: args.query,
        author: args.author,
        topic: args.topic,
        limit: args.limit,
    };
    let body = build_search_query(&params);
    log::debug!("Search body: {body}");

    let hits = store.search(index, &body)?;
    if hits.is_empty() {
        log::info!("No hits");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Id").fg(Color::Cyan),
            Cell::new("Score").fg(Color::Cyan),
            Cell::new("Updated").fg(Color::Cyan),
            Cell::new("Title").fg(Color::Cyan),
            Cell::new("Authors").fg(Color::Cyan),
        ]);
    for hit in &hits {
        table.add_row(vec![
            hit.id.clone(),
            format!("{:.2}", hit.score),
            hit.updated.clone(),
            hit.title.clone(),
            hit.authors.join(", "),
        ]);
    }
    eprintln!("\n{table}");
    log::info!("{} hits from {index}", hits.len());
    Ok(())
}
