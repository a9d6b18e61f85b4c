//! Page acquisition: launch a browser, load the URL, read the rendered HTML.
//!
//! A successful fetch yields a [`FetchSession`] that owns the browser and
//! its tab for the rest of the run. Whatever fails after launch, the
//! browser is shut down before the error is returned.

use crate::config::{SettleStrategy, ValidatorConfig};
use crate::error::FetchError;
use crate::renderer::{BrowserLauncher, RenderContext, Renderer};
use anyhow::Result;
use tracing::{debug, warn};
use url::Url;

/// Loads pages into freshly launched browsers.
pub struct Fetcher<'a> {
    launcher: &'a dyn BrowserLauncher,
    config: &'a ValidatorConfig,
}

impl<'a> Fetcher<'a> {
    pub fn new(launcher: &'a dyn BrowserLauncher, config: &'a ValidatorConfig) -> Self {
        Self { launcher, config }
    }

    /// Launch a browser, navigate to `url`, let it settle and read the HTML.
    pub async fn fetch(&self, url: &Url) -> Result<FetchSession, FetchError> {
        let renderer = self
            .launcher
            .launch(&self.config.browser)
            .await
            .map_err(FetchError::Launch)?;

        let page = match renderer.new_context().await {
            Ok(page) => page,
            Err(e) => {
                if let Err(shutdown) = renderer.shutdown().await {
                    warn!("browser shutdown failed: {shutdown:#}");
                }
                return Err(FetchError::Context(e));
            }
        };

        let mut session = FetchSession {
            renderer,
            page,
            html: String::new(),
            final_url: url.to_string(),
        };

        match session.load(url, self.config).await {
            Ok(()) => Ok(session),
            Err(e) => {
                if let Err(close) = session.close().await {
                    warn!("browser teardown failed: {close:#}");
                }
                Err(e)
            }
        }
    }
}

/// A loaded page and the browser that rendered it.
pub struct FetchSession {
    renderer: Box<dyn Renderer>,
    page: Box<dyn RenderContext>,
    html: String,
    final_url: String,
}

impl FetchSession {
    async fn load(&mut self, url: &Url, config: &ValidatorConfig) -> Result<(), FetchError> {
        let timeout_ms = config.navigation_timeout.as_millis() as u64;
        let nav = self
            .page
            .navigate(url.as_str(), timeout_ms)
            .await
            .map_err(|reason| FetchError::Navigation {
                url: url.to_string(),
                reason,
            })?;
        debug!(final_url = %nav.final_url, load_time_ms = nav.load_time_ms, "navigated");
        self.final_url = nav.final_url;

        match &config.settle {
            SettleStrategy::FixedDelay(delay) => tokio::time::sleep(*delay).await,
            SettleStrategy::WaitForSelector { selector, timeout } => {
                // A page that never shows the selector is still checked
                if let Err(e) = self.page.wait_for_element(selector, *timeout).await {
                    warn!("settle selector `{selector}` not found: {e:#}");
                }
            }
        }

        // Client-side redirects can move the page after load
        match self.page.get_url().await {
            Ok(current) if !current.is_empty() => self.final_url = current,
            _ => {}
        }

        self.html = self.page.get_html().await.map_err(FetchError::Content)?;
        debug!(bytes = self.html.len(), "read rendered HTML");
        Ok(())
    }

    /// Rendered HTML at the time of reading.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// URL the browser ended up on after redirects.
    pub fn final_url(&self) -> &str {
        &self.final_url
    }

    /// Live page handle for browser-backed checks.
    pub fn page(&self) -> &dyn RenderContext {
        self.page.as_ref()
    }

    /// Close the tab and shut the browser down.
    ///
    /// Both steps are attempted; the first error is returned.
    pub async fn close(self) -> Result<()> {
        let closed = self.page.close().await;
        debug!(
            open_contexts = self.renderer.active_contexts(),
            "tab closed, shutting down browser"
        );
        let shutdown = self.renderer.shutdown().await;
        closed.and(shutdown)
    }
}
