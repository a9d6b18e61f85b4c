//! Report data model and status aggregation.

use serde::{Deserialize, Serialize};

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Warning,
    Failed,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Warning => "warning",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Pending,
    Passed,
    Warning,
    Failed,
    Error,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Passed => "passed",
            Self::Warning => "warning",
            Self::Failed => "failed",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ten checks of the battery, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Accessibility,
    PageTitle,
    MetaTags,
    Links,
    Images,
    Forms,
    ResponsiveDesign,
    Performance,
    SeoElements,
    ContentRequirements,
}

impl CheckKind {
    /// Every check kind in battery order.
    pub const ALL: [CheckKind; 10] = [
        CheckKind::Accessibility,
        CheckKind::PageTitle,
        CheckKind::MetaTags,
        CheckKind::Links,
        CheckKind::Images,
        CheckKind::Forms,
        CheckKind::ResponsiveDesign,
        CheckKind::Performance,
        CheckKind::SeoElements,
        CheckKind::ContentRequirements,
    ];

    /// Display name reported in [`CheckResult::name`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Accessibility => "Website Accessibility",
            Self::PageTitle => "Page Title",
            Self::MetaTags => "Meta Tags",
            Self::Links => "Links Validation",
            Self::Images => "Images",
            Self::Forms => "Forms",
            Self::ResponsiveDesign => "Responsive Design",
            Self::Performance => "Performance",
            Self::SeoElements => "SEO Elements",
            Self::ContentRequirements => "Content Requirements",
        }
    }

    /// Static description reported in [`CheckResult::description`].
    pub fn description(&self) -> &'static str {
        match self {
            Self::Accessibility => "Check if the website is accessible and responding",
            Self::PageTitle => "Check if page has a title",
            Self::MetaTags => "Check for important meta tags",
            Self::Links => "Check for broken links",
            Self::Images => "Check images have alt text",
            Self::Forms => "Check forms have proper structure",
            Self::ResponsiveDesign => "Check responsive design across screen sizes",
            Self::Performance => "Check page load performance",
            Self::SeoElements => "Check for important SEO elements",
            Self::ContentRequirements => "Check content against PRD requirements",
        }
    }
}

/// Scored outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    /// Human-readable evidence.
    pub details: String,
    pub description: String,
}

impl CheckResult {
    pub fn new(kind: CheckKind, status: CheckStatus, details: impl Into<String>) -> Self {
        Self {
            name: kind.name().to_string(),
            status,
            details: details.into(),
            description: kind.description().to_string(),
        }
    }

    pub fn passed(kind: CheckKind, details: impl Into<String>) -> Self {
        Self::new(kind, CheckStatus::Passed, details)
    }

    pub fn warning(kind: CheckKind, details: impl Into<String>) -> Self {
        Self::new(kind, CheckStatus::Warning, details)
    }

    pub fn failed(kind: CheckKind, details: impl Into<String>) -> Self {
        Self::new(kind, CheckStatus::Failed, details)
    }

    /// A failed result carrying an internal error message.
    pub fn from_error(kind: CheckKind, err: impl std::fmt::Display) -> Self {
        Self::failed(kind, format!("Error: {err}"))
    }
}

/// Per-status counts over a run's results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
}

/// Count results by status and derive the overall verdict.
///
/// Any failure makes the run `failed`; otherwise any warning makes it
/// `warning`; otherwise it is `passed`. An empty slice yields `passed`.
pub fn aggregate(tests: &[CheckResult]) -> (Summary, OverallStatus) {
    let mut summary = Summary {
        total_tests: tests.len(),
        ..Summary::default()
    };
    for test in tests {
        match test.status {
            CheckStatus::Passed => summary.passed += 1,
            CheckStatus::Warning => summary.warnings += 1,
            CheckStatus::Failed => summary.failed += 1,
        }
    }

    let overall = if summary.failed > 0 {
        OverallStatus::Failed
    } else if summary.warnings > 0 {
        OverallStatus::Warning
    } else {
        OverallStatus::Passed
    };

    (summary, overall)
}

/// Structured result of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    overall_status: OverallStatus,
    tests: Vec<CheckResult>,
    summary: Summary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl ValidationReport {
    /// A fresh report for a run that has not produced any results yet.
    pub fn pending() -> Self {
        Self {
            overall_status: OverallStatus::Pending,
            tests: Vec::new(),
            summary: Summary::default(),
            error_message: None,
        }
    }

    /// Store the battery's results and aggregate them.
    pub fn record_tests(&mut self, tests: Vec<CheckResult>) {
        let (summary, overall) = aggregate(&tests);
        tracing::debug!(
            total = summary.total_tests,
            passed = summary.passed,
            warnings = summary.warnings,
            failed = summary.failed,
            "aggregated check results"
        );
        self.tests = tests;
        self.summary = summary;
        self.overall_status = overall;
    }

    /// Mark the run as aborted. Results recorded so far are kept.
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.overall_status = OverallStatus::Error;
        self.error_message = Some(message.into());
    }

    pub fn overall_status(&self) -> OverallStatus {
        self.overall_status
    }

    pub fn tests(&self) -> &[CheckResult] {
        &self.tests
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Whether the run finished without an `error` or `failed` verdict.
    pub fn is_success(&self) -> bool {
        matches!(
            self.overall_status,
            OverallStatus::Passed | OverallStatus::Warning
        )
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::pending()
    }
}
