//! Scripted browser for driving the pipeline without Chromium.

#![allow(dead_code)]

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use prd_validator_runtime::config::{
    BrowserOptions, SettleStrategy, ValidatorConfig, Viewport,
};
use prd_validator_runtime::renderer::{
    BrowserLauncher, NavigationResult, RenderContext, Renderer,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the fake browser does and what it observed.
#[derive(Clone)]
pub struct FakeBrowser {
    pub html: String,
    /// `document.body.scrollWidth` reported at every viewport.
    pub content_width: u32,
    pub fail_launch: bool,
    pub fail_navigation: bool,
    pub fail_reload: bool,
    pub fail_js: bool,
    /// Selector that never appears on the page.
    pub missing_selector: Option<String>,
    /// URL the page moves to after load, as a client-side redirect would.
    pub redirect_to: Option<String>,
    /// How long a reload takes before it completes.
    pub reload_delay: Duration,
    pub launches: Arc<AtomicUsize>,
    pub shutdowns: Arc<AtomicUsize>,
    pub open_contexts: Arc<AtomicUsize>,
    pub visited: Arc<Mutex<Vec<String>>>,
    pub viewports: Arc<Mutex<Vec<Viewport>>>,
    pub waited_for: Arc<Mutex<Vec<String>>>,
}

impl FakeBrowser {
    pub fn serving(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            content_width: 360,
            fail_launch: false,
            fail_navigation: false,
            fail_reload: false,
            fail_js: false,
            missing_selector: None,
            redirect_to: None,
            reload_delay: Duration::ZERO,
            launches: Arc::new(AtomicUsize::new(0)),
            shutdowns: Arc::new(AtomicUsize::new(0)),
            open_contexts: Arc::new(AtomicUsize::new(0)),
            visited: Arc::new(Mutex::new(Vec::new())),
            viewports: Arc::new(Mutex::new(Vec::new())),
            waited_for: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }

    pub fn open_contexts(&self) -> usize {
        self.open_contexts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserLauncher for FakeBrowser {
    async fn launch(&self, options: &BrowserOptions) -> Result<Box<dyn Renderer>> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail_launch {
            bail!("Chromium not found");
        }
        Ok(Box::new(FakeRenderer {
            script: self.clone(),
            viewport: options.viewport,
        }))
    }
}

struct FakeRenderer {
    script: FakeBrowser,
    viewport: Viewport,
}

#[async_trait]
impl Renderer for FakeRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        self.script.open_contexts.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeContext {
            script: self.script.clone(),
            viewport: Mutex::new(self.viewport),
        }))
    }

    async fn shutdown(self: Box<Self>) -> Result<()> {
        self.script.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn active_contexts(&self) -> usize {
        self.script.open_contexts()
    }
}

pub struct FakeContext {
    script: FakeBrowser,
    viewport: Mutex<Viewport>,
}

impl FakeContext {
    fn inner_width(&self) -> u32 {
        self.viewport.lock().map(|v| v.width).unwrap_or(0)
    }
}

#[async_trait]
impl RenderContext for FakeContext {
    async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> Result<NavigationResult> {
        self.script.visited.lock().unwrap().push(url.to_string());
        if self.script.fail_navigation {
            bail!("net::ERR_NAME_NOT_RESOLVED");
        }
        Ok(NavigationResult {
            final_url: url.to_string(),
            load_time_ms: 1,
        })
    }

    async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
        if self.script.fail_js {
            bail!("Execution context was destroyed");
        }
        match script {
            "document.body.scrollWidth" => Ok(self.script.content_width.into()),
            "window.innerWidth" => Ok(self.inner_width().into()),
            other => Err(anyhow!("unexpected script: {other}")),
        }
    }

    async fn get_html(&self) -> Result<String> {
        Ok(self.script.html.clone())
    }

    async fn get_url(&self) -> Result<String> {
        if let Some(url) = &self.script.redirect_to {
            return Ok(url.clone());
        }
        Ok(self
            .script
            .visited
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default())
    }

    async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
        *self.viewport.lock().unwrap() = viewport;
        self.script.viewports.lock().unwrap().push(viewport);
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        tokio::time::sleep(self.script.reload_delay).await;
        if self.script.fail_reload {
            bail!("page reload failed: target closed");
        }
        Ok(())
    }

    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.script
            .waited_for
            .lock()
            .unwrap()
            .push(selector.to_string());
        if self.script.missing_selector.as_deref() == Some(selector) {
            bail!("timed out after {:.1}s waiting for `{selector}`", timeout.as_secs_f64());
        }
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.script.open_contexts.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Config with every delay removed and short network timeouts.
pub fn fast_config() -> ValidatorConfig {
    ValidatorConfig {
        settle: SettleStrategy::FixedDelay(Duration::ZERO),
        accessibility_timeout: Duration::from_secs(2),
        link_timeout: Duration::from_secs(2),
        responsive_settle: Duration::ZERO,
        ..ValidatorConfig::default()
    }
}
