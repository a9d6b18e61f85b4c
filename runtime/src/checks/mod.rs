//! The check battery: ten independent checks, reported in fixed order.
//!
//! Document-only checks run first, inside a synchronous scope, because the
//! parsed tree is neither `Send` nor `Sync` and must not live across an
//! `.await`. The network and browser checks follow. Results are always
//! returned in battery order regardless of execution order.

pub mod browser;
pub mod content;
pub mod markup;
pub mod network;

use crate::config::{ValidatorConfig, RESPONSIVE_VIEWPORTS};
use crate::dom::Document;
use crate::http_client::HttpClient;
use crate::renderer::RenderContext;
use prd_validator::{CheckResult, CheckStatus, Requirement};
use tracing::{info, warn};
use url::Url;

/// `part / whole` as a percentage; 0 for an empty whole.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Grade `part / whole` against percentage thresholds using exact arithmetic.
pub fn grade_percentage(part: usize, whole: usize, pass_pct: usize, warn_pct: usize) -> CheckStatus {
    if part * 100 >= whole * pass_pct {
        CheckStatus::Passed
    } else if part * 100 >= whole * warn_pct {
        CheckStatus::Warning
    } else {
        CheckStatus::Failed
    }
}

/// Everything the battery derives from the document alone.
pub struct DocumentFindings {
    pub title: CheckResult,
    pub meta_tags: CheckResult,
    pub images: CheckResult,
    pub forms: CheckResult,
    pub seo: CheckResult,
    pub content: CheckResult,
    /// Probe targets for the links check.
    pub link_targets: Vec<network::LinkTarget>,
}

impl DocumentFindings {
    /// Parse `html` once and run every document-only check against it.
    pub fn inspect(
        html: &str,
        base_url: &Url,
        requirements: &[Requirement],
        link_sample_size: usize,
    ) -> Self {
        let doc = Document::parse(html);
        Self {
            title: markup::check_page_title(&doc),
            meta_tags: markup::check_meta_tags(&doc),
            images: markup::check_images(&doc),
            forms: markup::check_forms(&doc),
            seo: markup::check_seo_elements(&doc),
            content: content::check_content_requirements(&doc, requirements),
            link_targets: network::link_targets(&doc, base_url, link_sample_size),
        }
    }
}

/// Run all ten checks against a fetched page.
pub async fn run_battery(
    page: &dyn RenderContext,
    http: &HttpClient,
    config: &ValidatorConfig,
    url: &Url,
    html: &str,
    requirements: &[Requirement],
) -> Vec<CheckResult> {
    let findings = DocumentFindings::inspect(html, url, requirements, config.link_sample_size);

    let accessibility =
        network::check_accessibility(http, url.as_str(), config.accessibility_timeout).await;
    let links = network::check_links(http, &findings.link_targets, config.link_timeout).await;
    let responsive =
        browser::check_responsive_design(page, &RESPONSIVE_VIEWPORTS, config.responsive_settle)
            .await;
    let performance = browser::check_performance(page, config.reload_timeout).await;

    let results = vec![
        accessibility,
        findings.title,
        findings.meta_tags,
        links,
        findings.images,
        findings.forms,
        responsive,
        performance,
        findings.seo,
        findings.content,
    ];

    for result in &results {
        match result.status {
            CheckStatus::Failed => warn!(check = %result.name, details = %result.details, "check failed"),
            status => info!(check = %result.name, %status, details = %result.details, "check complete"),
        }
    }

    results
}
