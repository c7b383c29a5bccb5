//! Page session abstraction and readiness polling.
//!
//! Every scrape step goes through a [`PageSession`]: navigate, read the
//! rendered markup, click. Waiting for client-side rendering is done by
//! polling the markup for a selector with a bounded timeout.

use anyhow::Result;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// A single navigable browser tab, reused for every fetch in a run
#[async_trait]
pub trait PageSession: Send {
    /// Navigate the tab to `url`
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Current rendered markup of the tab
    async fn content(&mut self) -> Result<String>;

    /// Click the first element matching a CSS selector
    async fn click(&mut self, selector: &str) -> Result<()>;
}

/// Bounded polling for an asynchronous UI update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl WaitPolicy {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

/// Outcome of waiting for a selector; both variants carry the last markup read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready(String),
    TimedOut(String),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready(_))
    }

    pub fn into_markup(self) -> String {
        match self {
            Readiness::Ready(html) | Readiness::TimedOut(html) => html,
        }
    }
}

/// Parse a CSS selector, reporting the offending text on failure
pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Invalid selector {:?}: {}", css, e))
}

/// Check whether `html` contains at least one element matching `css`
pub fn has_element(html: &str, css: &str) -> Result<bool> {
    let selector = parse_selector(css)?;
    let document = Html::parse_document(html);
    let found = document.select(&selector).next().is_some();
    Ok(found)
}

/// Poll the session's markup until `css` matches or the policy times out
pub async fn wait_for_selector<S>(session: &mut S, css: &str, policy: &WaitPolicy) -> Result<Readiness>
where
    S: PageSession + ?Sized,
{
    wait_for_all(session, &[css], policy).await
}

/// Poll the session's markup until every selector in `all` matches in the
/// same read, or the policy times out
pub async fn wait_for_all<S>(session: &mut S, all: &[&str], policy: &WaitPolicy) -> Result<Readiness>
where
    S: PageSession + ?Sized,
{
    let deadline = Instant::now() + policy.timeout;
    let mut polls = 0u32;

    loop {
        let html = session.content().await?;
        polls += 1;

        let mut missing = None;
        for css in all {
            if !has_element(&html, css)? {
                missing = Some(*css);
                break;
            }
        }

        match missing {
            None => {
                debug!("{:?} present after {} poll(s)", all, polls);
                return Ok(Readiness::Ready(html));
            }
            Some(css) if Instant::now() >= deadline => {
                debug!("{} still missing after {} poll(s)", css, polls);
                return Ok(Readiness::TimedOut(html));
            }
            Some(_) => sleep(policy.interval).await,
        }
    }
}

/// Navigate to `url` and return the rendered markup once every selector in
/// `ready` is present.
///
/// A readiness timeout is not an error: the last markup is returned and the
/// caller's extraction decides whether the page is usable.
pub async fn fetch<S>(session: &mut S, url: &str, ready: &[&str], policy: &WaitPolicy) -> Result<String>
where
    S: PageSession + ?Sized,
{
    debug!("Fetching {}", url);
    session.navigate(url).await?;

    let readiness = wait_for_all(session, ready, policy).await?;
    if !readiness.is_ready() {
        warn!(
            "Timed out after {:?} waiting for {:?} on {}",
            policy.timeout, ready, url
        );
    }

    Ok(readiness.into_markup())
}
