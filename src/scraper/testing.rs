//! In-memory page session and fixture markup for tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use super::session::{has_element, PageSession, WaitPolicy};

/// Short waits so timeout paths stay quick
pub fn fast_policy() -> WaitPolicy {
    WaitPolicy::new(Duration::from_millis(30), Duration::from_millis(1))
}

/// Scripted stand-in for a browser tab.
///
/// Each URL maps to fixed markup. A page can switch to a "rendered" version
/// after a number of reads, and to a "revealed" version after a click.
#[derive(Default)]
pub struct FakeSession {
    pages: HashMap<String, String>,
    late: HashMap<String, (u32, String)>,
    revealed: HashMap<String, String>,
    current: Option<String>,
    page_reads: u32,
    clicked: bool,
    pub visits: Vec<String>,
    pub clicks: Vec<String>,
    pub content_reads: usize,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    /// Serve `html` from the `reads`-th read of `url` onwards
    pub fn rendering_after(mut self, url: &str, reads: u32, html: impl Into<String>) -> Self {
        self.late.insert(url.to_string(), (reads, html.into()));
        self
    }

    /// Serve `html` for `url` once something on it has been clicked
    pub fn with_revealed(mut self, url: &str, html: impl Into<String>) -> Self {
        self.revealed.insert(url.to_string(), html.into());
        self
    }

    fn visible(&self) -> Result<String> {
        let url = self.current.as_ref().ok_or_else(|| anyhow!("no page loaded"))?;

        if self.clicked {
            if let Some(html) = self.revealed.get(url) {
                return Ok(html.clone());
            }
        }
        if let Some((after, html)) = self.late.get(url) {
            if self.page_reads >= *after {
                return Ok(html.clone());
            }
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("no markup for {}", url))
    }
}

#[async_trait]
impl PageSession for FakeSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        if !self.pages.contains_key(url) {
            return Err(anyhow!("net::ERR_NAME_NOT_RESOLVED at {}", url));
        }
        self.visits.push(url.to_string());
        self.current = Some(url.to_string());
        self.page_reads = 0;
        self.clicked = false;
        Ok(())
    }

    async fn content(&mut self) -> Result<String> {
        self.page_reads += 1;
        self.content_reads += 1;
        self.visible()
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        let html = self.visible()?;
        if !has_element(&html, selector)? {
            return Err(anyhow!("no element matches {}", selector));
        }
        self.clicks.push(selector.to_string());
        self.clicked = true;
        Ok(())
    }
}

/// Race page markup in the shape of a polymarket event page.
///
/// `None` leaves the corresponding odds element out; the reveal button is
/// always present.
pub fn race_page(leader: &str, primary: Option<&str>, secondary: Option<&str>) -> String {
    let mut html = String::from("<html><body>\n");
    html.push_str(&format!(
        "<button class=\"c-PJLV c-cRTVfI\"><span>Leader</span><p class=\"c-cZBbTr\">{}</p></button>\n",
        leader
    ));
    if let Some(text) = primary {
        html.push_str(&format!(
            "<div class=\"c-gBrBnR c-kJKHmO c-gBrBnR-ifgGdkS-css\">{}</div>\n",
            text
        ));
    }
    if let Some(text) = secondary {
        html.push_str(&format!(
            "<div class=\"c-gBrBnR c-kJKHmO c-gBrBnR-ibMWmgq-css\">{}</div>\n",
            text
        ));
    }
    html.push_str("<button class=\"c-gBrBnR c-jWXdIq\">Show more</button>\n");
    html.push_str("</body></html>");
    html
}

/// Elections page with one map link per href
pub fn map_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!("<a href=\"{}\"><path d=\"M0 0\"></path></a>", href))
        .collect();
    format!(
        "<html><body><svg><g id=\"map-svg-group\">{}</g></svg></body></html>",
        links
    )
}
