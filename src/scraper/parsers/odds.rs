//! Odds parser for polymarket.com event pages.
//!
//! The event page shows the leading party's price prominently and may keep
//! the other party's price collapsed until the reveal button is clicked.
//! Elements are located by their styling-class fingerprints.

use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractError;
use crate::types::Party;

/// Button naming the party whose figure is shown first
pub const LEADER_BUTTON: &str = "button.c-PJLV.c-cRTVfI";
/// Party label inside the leader button
pub const LEADER_LABEL: &str = "p.c-cZBbTr";
/// Leading party's price
pub const PRIMARY_ODDS: &str = "div.c-gBrBnR.c-kJKHmO.c-gBrBnR-ifgGdkS-css";
/// Other party's price, absent until revealed on some pages
pub const SECONDARY_ODDS: &str = "div.c-gBrBnR.c-kJKHmO.c-gBrBnR-ibMWmgq-css";
/// Control that un-hides the secondary price
pub const REVEAL_BUTTON: &str = "button.c-gBrBnR.c-jWXdIq";

/// Parser for event page odds
pub struct OddsParser;

impl OddsParser {
    /// Party named by the leader indicator
    pub fn parse_leader(html: &str) -> Result<Party, ExtractError> {
        let document = Html::parse_document(html);
        let button = first(&document, LEADER_BUTTON)?.ok_or(ExtractError::MissingElement(LEADER_BUTTON))?;

        let label_selector = selector(LEADER_LABEL)?;
        let label = button
            .select(&label_selector)
            .next()
            .ok_or(ExtractError::MissingElement(LEADER_LABEL))?;

        let text = label.text().collect::<String>();
        Ok(Party::from_label(&text))
    }

    /// Leading party's figure as "<n>%"
    pub fn parse_primary(html: &str) -> Result<String, ExtractError> {
        let document = Html::parse_document(html);
        let elem = first(&document, PRIMARY_ODDS)?.ok_or(ExtractError::MissingElement(PRIMARY_ODDS))?;
        let text = elem.text().collect::<String>();
        Self::format_cents(&text)
    }

    /// Other party's figure as "<n>%", or None if it is not rendered yet
    pub fn parse_secondary(html: &str) -> Result<Option<String>, ExtractError> {
        let document = Html::parse_document(html);
        let text = match first(&document, SECONDARY_ODDS)? {
            Some(elem) => elem.text().collect::<String>(),
            None => return Ok(None),
        };
        Self::format_cents(&text).map(Some)
    }

    /// Turn a price label such as "Buy Yes 62.4¢" into "62.4%".
    ///
    /// The last whitespace-separated token is taken and its cents sign (or
    /// any other trailing unit) removed. The remaining number is kept exactly
    /// as displayed.
    pub fn format_cents(text: &str) -> Result<String, ExtractError> {
        let token = text
            .split_whitespace()
            .last()
            .ok_or_else(|| ExtractError::MalformedFigure(text.to_string()))?;

        let number = token.trim_end_matches(|c: char| !c.is_ascii_digit());
        if number.is_empty() || number.parse::<f64>().is_err() {
            return Err(ExtractError::MalformedFigure(token.to_string()));
        }

        Ok(format!("{}%", number))
    }
}

fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Other(format!("invalid selector {}: {}", css, e)))
}

fn first<'a>(document: &'a Html, css: &'static str) -> Result<Option<ElementRef<'a>>, ExtractError> {
    let sel = selector(css)?;
    let found = document.select(&sel).next();
    Ok(found)
}
