//! Browser abstraction used by the fetcher and the browser-backed checks.
//!
//! A [`BrowserLauncher`] starts one isolated browser per validation run.
//! The browser hands out [`RenderContext`]s (tabs) that can navigate, read
//! HTML, run scripts, resize the viewport, reload and wait for elements.
//! Chromium via chromiumoxide is the production engine; tests use fakes.

pub mod chromium;

use crate::config::{BrowserOptions, Viewport};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of navigating to a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResult {
    /// The final URL after any redirects.
    pub final_url: String,
    /// Time taken to load the page in milliseconds.
    pub load_time_ms: u64,
}

/// Starts fresh browser instances.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Launch a new, unshared browser configured by `options`.
    async fn launch(&self, options: &BrowserOptions) -> Result<Box<dyn Renderer>>;
}

/// A running browser engine that can create rendering contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Create a new browser context (tab).
    async fn new_context(&self) -> Result<Box<dyn RenderContext>>;
    /// Shut down the browser engine and release its process.
    async fn shutdown(self: Box<Self>) -> Result<()>;
    /// Number of currently active contexts.
    fn active_contexts(&self) -> usize;
}

/// A single browser context (tab) for rendering pages.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Navigate to a URL with a timeout.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult>;
    /// Execute JavaScript in the page context and return the result.
    async fn execute_js(&self, script: &str) -> Result<serde_json::Value>;
    /// Get the full rendered page HTML.
    async fn get_html(&self) -> Result<String>;
    /// Get the current URL.
    async fn get_url(&self) -> Result<String>;
    /// Resize the page viewport.
    async fn set_viewport(&self, viewport: Viewport) -> Result<()>;
    /// Reload the current page.
    async fn reload(&self) -> Result<()>;
    /// Wait until an element matching `selector` is present.
    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<()>;
    /// Close this context.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Evaluate `script` and read the result as a number.
pub async fn execute_js_number(ctx: &dyn RenderContext, script: &str) -> Result<f64> {
    let value = ctx.execute_js(script).await?;
    value
        .as_f64()
        .ok_or_else(|| anyhow::anyhow!("script `{script}` returned non-numeric value: {value}"))
}
