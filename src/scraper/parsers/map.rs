//! Elections map parser for polymarket.com
//!
//! The elections page embeds an SVG map whose group `#map-svg-group` holds
//! one link per state race.

use anyhow::Result;
use scraper::{Html, Selector};

/// Container of the state links
pub const MAP_CONTAINER: &str = "#map-svg-group";

/// Parser for the elections map
pub struct MapParser;

impl MapParser {
    /// State race hrefs in document order.
    ///
    /// A missing container or a link without `href` is an error; the map is
    /// the run's entry point and nothing useful can be scraped without it.
    pub fn state_links(html: &str) -> Result<Vec<String>> {
        let document = Html::parse_document(html);
        let container_selector = Selector::parse(MAP_CONTAINER).unwrap();
        let link_selector = Selector::parse("a").unwrap();

        let container = document
            .select(&container_selector)
            .next()
            .ok_or_else(|| anyhow::anyhow!("Map container {} not found", MAP_CONTAINER))?;

        let mut links = Vec::new();
        for (i, elem) in container.select(&link_selector).enumerate() {
            match elem.value().attr("href") {
                Some(href) => links.push(href.to_string()),
                None => anyhow::bail!("Map link #{} has no href", i),
            }
        }

        Ok(links)
    }
}
