//! Checks that probe the site over plain HTTP.

use crate::dom::Document;
use crate::http_client::HttpClient;
use prd_validator::{CheckKind, CheckResult, CheckStatus};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// A sampled `<a href>` that the links check will probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Absolute or base-resolved URL to HEAD.
    Probe(String),
    /// A root-relative href that could not be joined onto the base URL.
    Unresolvable { href: String, reason: String },
}

/// Probe targets among the first `sample` `<a href>` elements.
///
/// Hrefs starting with `http` are probed as written, hrefs starting with
/// `/` are resolved against `base`. Anything else (fragments, `mailto:`,
/// relative paths) is skipped and not counted.
pub fn link_targets(doc: &Document, base: &Url, sample: usize) -> Vec<LinkTarget> {
    doc.find_all_with_attr("a", "href")
        .take(sample)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            if href.starts_with("http") {
                Some(LinkTarget::Probe(href.to_string()))
            } else if href.starts_with('/') {
                Some(match base.join(href) {
                    Ok(url) => LinkTarget::Probe(url.to_string()),
                    Err(e) => LinkTarget::Unresolvable {
                        href: href.to_string(),
                        reason: e.to_string(),
                    },
                })
            } else {
                None
            }
        })
        .collect()
}

/// Passed iff a plain GET of `url` answers 200.
pub async fn check_accessibility(http: &HttpClient, url: &str, timeout: Duration) -> CheckResult {
    match http.get_status(url, timeout).await {
        Ok(status) => {
            let outcome = if status == 200 {
                CheckStatus::Passed
            } else {
                CheckStatus::Failed
            };
            CheckResult::new(
                CheckKind::Accessibility,
                outcome,
                format!("Status code: {status}"),
            )
        }
        Err(e) => CheckResult::from_error(CheckKind::Accessibility, format!("{e:#}")),
    }
}

/// HEAD each target; 200 is valid, any other status or error is broken.
/// Passed with no broken links, warning with one or two, failed beyond.
pub async fn check_links(http: &HttpClient, targets: &[LinkTarget], timeout: Duration) -> CheckResult {
    let mut valid = 0usize;
    let mut broken = 0usize;

    for target in targets {
        match target {
            LinkTarget::Probe(url) => match http.head_status(url, timeout).await {
                Ok(200) => valid += 1,
                Ok(status) => {
                    debug!(%url, status, "broken link");
                    broken += 1;
                }
                Err(e) => {
                    debug!(%url, error = %e, "link probe failed");
                    broken += 1;
                }
            },
            LinkTarget::Unresolvable { href, reason } => {
                debug!(%href, %reason, "unresolvable link");
                broken += 1;
            }
        }
    }

    let status = match broken {
        0 => CheckStatus::Passed,
        1 | 2 => CheckStatus::Warning,
        _ => CheckStatus::Failed,
    };
    CheckResult::new(
        CheckKind::Links,
        status,
        format!("Valid: {valid}, Broken: {broken}"),
    )
}
