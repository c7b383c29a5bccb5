//! Map and district drivers.
//!
//! Both drivers run the same per-race cycle (fetch, title, extract, report)
//! over a list of URLs; they differ in where the list comes from and in the
//! title variant.

use anyhow::{Context, Result};
use tracing::info;

use super::parsers::map::MAP_CONTAINER;
use super::parsers::odds::{LEADER_BUTTON, PRIMARY_ODDS};
use super::parsers::MapParser;
use super::session::{fetch, PageSession, WaitPolicy};
use super::title::{district_title, state_title};
use super::votes::extract_votes;
use super::absolute_url;
use crate::types::RaceOdds;

/// A race page is usable once the leader indicator and its price are both rendered
const RACE_READY: [&str; 2] = [LEADER_BUTTON, PRIMARY_ODDS];

/// Sequential race scraper over one shared page session
pub struct RaceScraper<'s, S: PageSession + ?Sized> {
    session: &'s mut S,
    base_url: String,
    page_wait: WaitPolicy,
    reveal_wait: WaitPolicy,
}

impl<'s, S: PageSession + ?Sized> RaceScraper<'s, S> {
    pub fn new(
        session: &'s mut S,
        base_url: impl Into<String>,
        page_wait: WaitPolicy,
        reveal_wait: WaitPolicy,
    ) -> Self {
        Self {
            session,
            base_url: base_url.into(),
            page_wait,
            reveal_wait,
        }
    }

    /// Scrape every state linked from the elections map, in map order
    pub async fn scrape_map(&mut self, entry_url: &str) -> Result<Vec<RaceOdds>> {
        let html = fetch(&mut *self.session, entry_url, &[MAP_CONTAINER], &self.page_wait)
            .await
            .with_context(|| format!("Failed to load elections map {}", entry_url))?;

        let links = MapParser::state_links(&html)
            .with_context(|| format!("Failed to read state links from {}", entry_url))?;
        info!("Found {} state races on the map", links.len());

        let mut records = Vec::with_capacity(links.len());
        for href in &links {
            let url = absolute_url(&self.base_url, href);
            let title = state_title(href);
            records.push(self.scrape_race(&url, title).await?);
        }

        Ok(records)
    }

    /// Scrape the given district races, in list order
    pub async fn scrape_districts(&mut self, urls: &[String]) -> Result<Vec<RaceOdds>> {
        info!("Scraping {} district races", urls.len());

        let mut records = Vec::with_capacity(urls.len());
        for url in urls {
            let title = district_title(url);
            records.push(self.scrape_race(url, title).await?);
        }

        Ok(records)
    }

    /// One fetch-extract cycle.
    ///
    /// Navigation errors propagate; extraction errors become a null record.
    pub async fn scrape_race(&mut self, url: &str, title: String) -> Result<RaceOdds> {
        let html = fetch(&mut *self.session, url, &RACE_READY, &self.page_wait)
            .await
            .with_context(|| format!("Failed to load race page {}", url))?;

        let (republican_pct, democrat_pct) =
            extract_votes(&mut *self.session, &html, &self.reveal_wait).await;

        let record = RaceOdds::new(title, republican_pct, democrat_pct);
        println!("{}", record);

        Ok(record)
    }
}

/// All state records followed by all district records, each in scrape order
pub fn aggregate(states: Vec<RaceOdds>, districts: Vec<RaceOdds>) -> Vec<RaceOdds> {
    let mut all = states;
    all.extend(districts);
    all
}
