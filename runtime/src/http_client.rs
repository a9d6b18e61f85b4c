//! Async HTTP client wrapping reqwest.
//!
//! Not a browser: plain status probes for the accessibility and link
//! checks. Every request is a single attempt: no retries, no backoff.

use anyhow::{Context, Result};
use std::time::Duration;

/// Maximum redirects followed by GET probes.
const MAX_REDIRECTS: usize = 10;

/// Status probe client.
#[derive(Clone)]
pub struct HttpClient {
    /// Follows redirects; used for GET.
    client: reqwest::Client,
    /// Never follows redirects; used for HEAD, so a 3xx counts as-is.
    head_client: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client with standard Chrome user-agent.
    pub fn new() -> Result<Self> {
        let ua = "Mozilla/5.0 (X11; Linux x86_64) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/131.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(ua)
            .build()
            .context("failed to build HTTP client")?;

        let head_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(ua)
            .build()
            .context("failed to build HEAD client")?;

        Ok(Self {
            client,
            head_client,
        })
    }

    /// Issue a GET and return the final status code.
    pub async fn get_status(&self, url: &str, timeout: Duration) -> Result<u16> {
        let resp = self.client.get(url).timeout(timeout).send().await?;
        Ok(resp.status().as_u16())
    }

    /// Issue a HEAD and return its status code without following redirects.
    pub async fn head_status(&self, url: &str, timeout: Duration) -> Result<u16> {
        let resp = self.head_client.head(url).timeout(timeout).send().await?;
        Ok(resp.status().as_u16())
    }
}
