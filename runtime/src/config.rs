//! Run configuration: browser location, viewport, and timing.
//!
//! Checks and their thresholds are fixed. Only timing and the browser
//! binary can be tuned; the CLI reads overrides from flags or the
//! `PRD_VALIDATOR_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming an explicit Chromium binary.
pub const ENV_CHROMIUM_PATH: &str = "PRD_VALIDATOR_CHROMIUM_PATH";
/// Environment variable overriding the post-navigation settle delay (ms).
pub const ENV_SETTLE_MS: &str = "PRD_VALIDATOR_SETTLE_MS";
/// Environment variable naming a CSS selector to wait for after navigation.
pub const ENV_WAIT_FOR: &str = "PRD_VALIDATOR_WAIT_FOR";

/// Viewport the browser is launched with.
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1920,
    height: 1080,
};

/// Viewports visited by the responsive design check.
pub const RESPONSIVE_VIEWPORTS: [Viewport; 4] = [
    Viewport {
        width: 1920,
        height: 1080,
    },
    Viewport {
        width: 1366,
        height: 768,
    },
    Viewport {
        width: 768,
        height: 1024,
    },
    Viewport {
        width: 375,
        height: 667,
    },
];

/// Browser window dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// How the fetcher decides a freshly navigated page is ready to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleStrategy {
    /// Sleep for a fixed time after navigation.
    FixedDelay(Duration),
    /// Poll until an element matching `selector` exists, up to `timeout`.
    WaitForSelector { selector: String, timeout: Duration },
}

impl Default for SettleStrategy {
    fn default() -> Self {
        Self::FixedDelay(Duration::from_secs(3))
    }
}

/// Options handed to a [`crate::renderer::BrowserLauncher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserOptions {
    /// Explicit browser binary; discovered when `None`.
    pub executable: Option<PathBuf>,
    pub viewport: Viewport,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            executable: None,
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

/// Everything a validation run needs besides its two inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub browser: BrowserOptions,
    pub settle: SettleStrategy,
    pub navigation_timeout: Duration,
    /// Timeout of the plain GET issued by the accessibility check.
    pub accessibility_timeout: Duration,
    /// Timeout of each HEAD issued by the links check.
    pub link_timeout: Duration,
    /// How many `<a href>` elements the links check samples.
    pub link_sample_size: usize,
    /// Pause after each viewport resize.
    pub responsive_settle: Duration,
    /// Bound on waiting for `<body>` after a reload.
    pub reload_timeout: Duration,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            browser: BrowserOptions::default(),
            settle: SettleStrategy::default(),
            navigation_timeout: Duration::from_secs(30),
            accessibility_timeout: Duration::from_secs(10),
            link_timeout: Duration::from_secs(5),
            link_sample_size: 10,
            responsive_settle: Duration::from_secs(1),
            reload_timeout: Duration::from_secs(10),
        }
    }
}

impl ValidatorConfig {
    /// Apply explicit overrides. A wait-for selector takes precedence over a
    /// settle delay; when both are given the delay becomes the wait timeout.
    pub fn with_overrides(
        mut self,
        chromium: Option<PathBuf>,
        settle_ms: Option<u64>,
        wait_for: Option<String>,
    ) -> Self {
        if let Some(path) = chromium {
            self.browser.executable = Some(path);
        }
        let wait_for = wait_for.filter(|s| !s.trim().is_empty());
        self.settle = match (wait_for, settle_ms) {
            (Some(selector), ms) => SettleStrategy::WaitForSelector {
                selector,
                timeout: ms.map(Duration::from_millis).unwrap_or(self.reload_timeout),
            },
            (None, Some(ms)) => SettleStrategy::FixedDelay(Duration::from_millis(ms)),
            (None, None) => self.settle,
        };
        self
    }
}
