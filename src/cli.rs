//! CLI for polymarket-odds.
//!
//! Running without arguments scrapes every map state and every configured
//! district and writes one timestamped CSV.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::output::{output_path, write_csv};
use crate::scraper::drivers::aggregate;
use crate::scraper::{Browser, PageSession, RaceScraper};
use crate::types::RaceOdds;

#[derive(Parser, Debug, Default)]
#[command(name = "polymarket-odds")]
#[command(version, about = "Polymarket presidential election odds by state and district", long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./config.{toml,yaml,json} when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for the CSV output
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip the state map
    #[arg(long)]
    pub skip_map: bool,

    /// Skip the congressional districts
    #[arg(long)]
    pub skip_districts: bool,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.to_string_lossy().to_string();
        }
        if self.headful {
            config.browser.headless = false;
        }
    }
}

/// Run the full scrape and write the CSV.
///
/// The browser is closed whether or not scraping succeeded. Nothing is
/// written unless every step before the write succeeded.
pub async fn run_scrape(cli: Cli) -> Result<()> {
    let started = Local::now();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    let mut browser = Browser::launch(&config.browser).await?;
    let scraped = scrape_all(&mut browser, &config, cli.skip_map, cli.skip_districts).await;
    if let Err(e) = browser.close().await {
        warn!("Browser shutdown failed: {}", e);
    }
    let records = scraped?;

    let path = output_path(Path::new(&config.output.dir), &config.output.prefix, &started);
    write_csv(&records, &path)?;

    let complete = records.iter().filter(|r| r.is_complete()).count();
    info!(
        "{} of {} races extracted, {} failed",
        complete,
        records.len(),
        records.len() - complete
    );
    println!("Saved results to {}", path.display());

    Ok(())
}

/// Scrape map states then districts over one session
pub async fn scrape_all<S>(
    session: &mut S,
    config: &AppConfig,
    skip_map: bool,
    skip_districts: bool,
) -> Result<Vec<RaceOdds>>
where
    S: PageSession + ?Sized,
{
    let mut scraper = RaceScraper::new(
        session,
        config.scraper.base_url.clone(),
        config.wait.page_policy(),
        config.wait.reveal_policy(),
    );

    let states = if skip_map {
        Vec::new()
    } else {
        info!("Scraping state map from {}", config.scraper.entry_url);
        scraper.scrape_map(&config.scraper.entry_url).await?
    };

    let districts = if skip_districts {
        Vec::new()
    } else {
        scraper.scrape_districts(&config.scraper.district_urls).await?
    };

    Ok(aggregate(states, districts))
}
