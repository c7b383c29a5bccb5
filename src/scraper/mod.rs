//! Web scraper module for polymarket.com election markets
//!
//! Provides browser automation, HTML parsing, title normalization and the
//! per-race drivers.

pub mod browser;
pub mod drivers;
pub mod parsers;
pub mod session;
pub mod title;
pub mod votes;

#[cfg(test)]
pub mod testing;

pub use browser::Browser;
pub use drivers::RaceScraper;
pub use session::{PageSession, WaitPolicy};

/// Base URL for polymarket.com
pub const BASE_URL: &str = "https://polymarket.com";

/// Elections landing page with the interactive state map
pub const ELECTIONS_URL: &str = "https://polymarket.com/elections";

/// Congressional districts that split electoral votes
pub const DISTRICT_LINKS: [&str; 5] = [
    "https://polymarket.com/event/congressional-district-1st-maine-presidential-election-winner",
    "https://polymarket.com/event/congressional-district-2nd-maine-presidential-election-winner",
    "https://polymarket.com/event/congressional-district-1st-nebraska-presidential-election-winner",
    "https://polymarket.com/event/congressional-district-2nd-nebraska-presidential-election-winner",
    "https://polymarket.com/event/congressional-district-3rd-nebraska-presidential-election-winner",
];

/// Resolve a map link against the site base.
///
/// Absolute links are returned unchanged.
pub fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        format!("{}/{}", base, href)
    }
}
