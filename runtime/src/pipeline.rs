// Copyright 2026 PRD Validator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Validation pipeline: fetch, parse, extract requirements, run the
//! battery, aggregate.
//!
//! Every run launches its own browser and shares no state with other runs,
//! so one [`Validator`] can serve concurrent requests.

use crate::checks;
use crate::config::ValidatorConfig;
use crate::error::{FetchError, ValidatorError};
use crate::fetcher::Fetcher;
use crate::http_client::HttpClient;
use crate::renderer::chromium::ChromiumLauncher;
use crate::renderer::BrowserLauncher;
use prd_validator::{extract_requirements, CheckResult, ValidationReport};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use url::Url;

/// Runs validations against live websites.
#[derive(Clone)]
pub struct Validator {
    launcher: Arc<dyn BrowserLauncher>,
    http: HttpClient,
    config: ValidatorConfig,
}

impl Validator {
    /// A validator that uses `launcher` for its browsers.
    pub fn new(
        launcher: Arc<dyn BrowserLauncher>,
        config: ValidatorConfig,
    ) -> Result<Self, ValidatorError> {
        let http = HttpClient::new().map_err(ValidatorError::Http)?;
        Ok(Self {
            launcher,
            http,
            config,
        })
    }

    /// A validator backed by headless Chromium.
    pub fn chromium(config: ValidatorConfig) -> Result<Self, ValidatorError> {
        Self::new(Arc::new(ChromiumLauncher), config)
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `url` against the requirements found in `prd_text`.
    ///
    /// Never fails: a run-fatal problem yields a report with status
    /// `error` and the underlying message.
    pub async fn run(&self, url: &str, prd_text: &str) -> ValidationReport {
        let started = Instant::now();
        let mut report = ValidationReport::pending();
        info!(%url, "validation started");

        match self.execute(url, prd_text).await {
            Ok(tests) => report.record_tests(tests),
            Err(e) => {
                error!(%url, "validation aborted: {e}");
                report.fail_with(e.to_string());
            }
        }

        info!(
            %url,
            status = %report.overall_status(),
            passed = report.summary().passed,
            warnings = report.summary().warnings,
            failed = report.summary().failed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "validation finished"
        );
        report
    }

    async fn execute(&self, url: &str, prd_text: &str) -> Result<Vec<CheckResult>, ValidatorError> {
        let target = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let session = Fetcher::new(self.launcher.as_ref(), &self.config)
            .fetch(&target)
            .await?;

        let requirements = extract_requirements(prd_text);
        info!(
            requirements = requirements.len(),
            final_url = %session.final_url(),
            "page fetched"
        );

        let tests = checks::run_battery(
            session.page(),
            &self.http,
            &self.config,
            &target,
            session.html(),
            &requirements,
        )
        .await;

        if let Err(e) = session.close().await {
            warn!("browser teardown failed: {e:#}");
        }

        Ok(tests)
    }
}
