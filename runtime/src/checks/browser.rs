//! Checks that drive the live browser page.

use super::{grade_percentage, percentage};
use crate::config::Viewport;
use crate::renderer::{execute_js_number, RenderContext};
use anyhow::Result;
use prd_validator::{CheckKind, CheckResult, CheckStatus};
use std::time::{Duration, Instant};
use tracing::debug;

const BODY_SCROLL_WIDTH: &str = "document.body.scrollWidth";
const WINDOW_INNER_WIDTH: &str = "window.innerWidth";

/// Share of `viewports` without horizontal overflow:
/// passed >= 75%, warning >= 50%, else failed. Any browser error fails.
pub async fn check_responsive_design(
    page: &dyn RenderContext,
    viewports: &[Viewport],
    settle: Duration,
) -> CheckResult {
    match responsive_count(page, viewports, settle).await {
        Ok(responsive) => CheckResult::new(
            CheckKind::ResponsiveDesign,
            grade_percentage(responsive, viewports.len(), 75, 50),
            format!(
                "Responsive score: {:.1}%",
                percentage(responsive, viewports.len())
            ),
        ),
        Err(e) => CheckResult::from_error(CheckKind::ResponsiveDesign, format!("{e:#}")),
    }
}

async fn responsive_count(
    page: &dyn RenderContext,
    viewports: &[Viewport],
    settle: Duration,
) -> Result<usize> {
    let mut responsive = 0;
    for viewport in viewports {
        page.set_viewport(*viewport).await?;
        tokio::time::sleep(settle).await;

        let body_width = execute_js_number(page, BODY_SCROLL_WIDTH).await?;
        let inner_width = execute_js_number(page, WINDOW_INNER_WIDTH).await?;
        debug!(%viewport, body_width, inner_width, "measured viewport overflow");

        if body_width <= inner_width {
            responsive += 1;
        }
    }
    Ok(responsive)
}

/// Grade a page load duration: under 3s passes, under 5s warns.
pub fn grade_load_time(elapsed: Duration) -> CheckStatus {
    let secs = elapsed.as_secs_f64();
    if secs < 3.0 {
        CheckStatus::Passed
    } else if secs < 5.0 {
        CheckStatus::Warning
    } else {
        CheckStatus::Failed
    }
}

/// Time a full reload until `<body>` is present.
///
/// The reload and the wait together are bounded by `timeout`; running out
/// of time fails the check.
pub async fn check_performance(page: &dyn RenderContext, timeout: Duration) -> CheckResult {
    let start = Instant::now();
    let reloaded = tokio::time::timeout(timeout, async {
        page.reload().await?;
        page.wait_for_element("body", timeout).await
    })
    .await;

    match reloaded {
        Ok(Ok(())) => {
            let elapsed = start.elapsed();
            CheckResult::new(
                CheckKind::Performance,
                grade_load_time(elapsed),
                format!("Load time: {:.2}s", elapsed.as_secs_f64()),
            )
        }
        Ok(Err(e)) => CheckResult::from_error(CheckKind::Performance, format!("{e:#}")),
        Err(_) => CheckResult::from_error(
            CheckKind::Performance,
            format!("page did not reload within {:.1}s", timeout.as_secs_f64()),
        ),
    }
}
