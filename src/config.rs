//! Configuration for the odds scraper.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::scraper::{WaitPolicy, BASE_URL, DISTRICT_LINKS, ELECTIONS_URL};

/// Target site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Page holding the interactive state map
    #[serde(default = "default_entry_url")]
    pub entry_url: String,
    /// District races, scraped in this order after the map states
    #[serde(default = "default_district_urls")]
    pub district_urls: Vec<String>,
}

fn default_base_url() -> String {
    BASE_URL.to_string()
}

fn default_entry_url() -> String {
    ELECTIONS_URL.to_string()
}

fn default_district_urls() -> Vec<String> {
    DISTRICT_LINKS.iter().map(|s| s.to_string()).collect()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            entry_url: default_entry_url(),
            district_urls: default_district_urls(),
        }
    }
}

/// Chrome launch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome executable; auto-detected when unset
    #[serde(default)]
    pub chrome_path: Option<String>,
    #[serde(default = "default_headless")]
    pub headless: bool,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_browser_args")]
    pub args: Vec<String>,
}

fn default_headless() -> bool {
    true
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_browser_args() -> Vec<String> {
    [
        "--disable-gpu",
        "--disable-dev-shm-usage",
        "--window-position=-2400,-2400",
        "--blink-settings=imagesEnabled=false",
        "--disable-extensions",
        "--ignore-certificate-errors",
        "--ignore-ssl-errors",
        "--ignore-certificate-errors-spki-list",
        "--disable-proxy-certificate-handler",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: default_headless(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            args: default_browser_args(),
        }
    }
}

/// Readiness polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Upper bound on waiting for a freshly navigated page to render
    #[serde(default = "default_page_timeout_ms")]
    pub page_timeout_ms: u64,
    /// Upper bound on waiting for the hidden odds figure after a reveal click
    #[serde(default = "default_reveal_timeout_ms")]
    pub reveal_timeout_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_page_timeout_ms() -> u64 {
    10_000
}

fn default_reveal_timeout_ms() -> u64 {
    3_000
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            page_timeout_ms: default_page_timeout_ms(),
            reveal_timeout_ms: default_reveal_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl WaitConfig {
    pub fn page_policy(&self) -> WaitPolicy {
        WaitPolicy::new(
            Duration::from_millis(self.page_timeout_ms),
            Duration::from_millis(self.poll_interval_ms),
        )
    }

    pub fn reveal_policy(&self) -> WaitPolicy {
        WaitPolicy::new(
            Duration::from_millis(self.reveal_timeout_ms),
            Duration::from_millis(self.poll_interval_ms),
        )
    }
}

/// CSV output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_output_prefix")]
    pub prefix: String,
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_output_prefix() -> String {
    "polymarket_elections".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            prefix: default_output_prefix(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub wait: WaitConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional config file and the environment.
    ///
    /// Without an explicit path, `config.{toml,yaml,json}` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(file)
            // Override with environment variables (POLYMARKET_WAIT__PAGE_TIMEOUT_MS, etc.)
            .add_source(
                config::Environment::with_prefix("POLYMARKET")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
