//! Browser automation using chromiumoxide.

use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as ChromeBrowser, BrowserConfig as ChromeConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tracing::{debug, info, warn};

use super::session::PageSession;
use crate::config::BrowserConfig;

/// Browser wrapper holding the single tab every fetch goes through.
///
/// Call [`Browser::close`] when done; dropping the wrapper without closing
/// still stops the CDP handler task and chromiumoxide kills the child
/// process.
pub struct Browser {
    browser: ChromeBrowser,
    page: Page,
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch Chrome and open a blank tab
    pub async fn launch(settings: &BrowserConfig) -> Result<Self> {
        let mut builder = ChromeConfig::builder()
            .no_sandbox()
            .window_size(settings.window_width, settings.window_height);

        if let Some(path) = &settings.chrome_path {
            builder = builder.chrome_executable(path);
        }
        if !settings.headless {
            builder = builder.with_head();
        }
        for arg in &settings.args {
            builder = builder.arg(arg.as_str());
        }

        let config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {}", e))?;

        let (browser, mut handler) = ChromeBrowser::launch(config)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to launch browser: {}", e))?;

        // Spawn handler task - must keep running for browser to work
        let handle = tokio::spawn(async move {
            loop {
                match handler.next().await {
                    Some(Ok(_)) => continue,
                    Some(Err(_)) => continue, // Don't break on errors
                    None => break,
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handle.abort();
                return Err(anyhow::anyhow!("Failed to create new page: {}", e));
            }
        };

        info!("Browser launched (headless: {})", settings.headless);
        Ok(Self {
            browser,
            page,
            handle,
        })
    }

    /// Close the browser and wait for the process to exit
    pub async fn close(mut self) -> Result<()> {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        self.handle.abort();
        debug!("Browser closed");
        Ok(())
    }
}

impl Drop for Browser {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[async_trait]
impl PageSession for Browser {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to navigate to {}: {}", url, e))?;
        Ok(())
    }

    async fn content(&mut self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get page content: {}", e))
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to find {}: {}", selector, e))?;
        element
            .click()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to click {}: {}", selector, e))?;
        Ok(())
    }
}
