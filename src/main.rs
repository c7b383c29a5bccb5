//! Polymarket election odds scraper
//!
//! Scrapes presidential election odds for every state on the elections map
//! and for the congressional districts that split electoral votes, then
//! writes them to a timestamped CSV.

mod cli;
mod config;
mod error;
mod output;
mod scraper;
mod types;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "polymarket_odds=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    cli::run_scrape(cli).await
}
