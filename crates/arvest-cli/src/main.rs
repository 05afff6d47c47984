//! arvest - Harvest arXiv metadata into a search index
//!
//! Fetches paper metadata from the arXiv query API, normalizes it into
//! records, and upserts them idempotently into an OpenSearch index.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "arvest")]
#[command(about = "Harvest arXiv metadata into a search index")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Only log warnings and errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file path (default: ./arvest.toml or ~/.config/arvest/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Harvest one page of papers and index them
    Harvest(cmd::harvest::HarvestArgs),
    /// Search the paper index
    Search(cmd::search::SearchArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    arvest_core::init_logging(cli.quiet, cli.debug);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Harvest(args) => cmd::harvest::run(args, &config),
        Command::Search(args) => cmd::search::run(args, &config),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec!["arXiv base URL", &config.arxiv.base_url]);
            table.add_row(vec!["Page size", &config.arxiv.page_size.to_string()]);
            table.add_row(vec![
                "Request timeout",
                &format!("{}s", config.arxiv.timeout_secs),
            ]);
            table.add_row(vec!["Store URL", &config.store.url]);
            table.add_row(vec!["Index", &config.store.index]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
