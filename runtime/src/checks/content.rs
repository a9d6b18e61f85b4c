//! PRD requirement coverage of the page text.

use super::{grade_percentage, percentage};
use crate::dom::Document;
use prd_validator::{CheckKind, CheckResult, Requirement};

/// Requirements with at least one word occurring anywhere in `page_text`.
///
/// `page_text` must already be lowercased. Matching is substring
/// containment, so the word "log" is found inside "login".
pub fn found_requirements<'r>(
    page_text: &str,
    requirements: &'r [Requirement],
) -> Vec<&'r Requirement> {
    requirements
        .iter()
        .filter(|req| req.words().any(|word| page_text.contains(word)))
        .collect()
}

/// Passed when >= 70% of requirements are found, warning >= 40%.
/// Without requirements the check is a warning.
pub fn check_content_requirements(doc: &Document, requirements: &[Requirement]) -> CheckResult {
    if requirements.is_empty() {
        return CheckResult::warning(
            CheckKind::ContentRequirements,
            "No specific requirements found in PRD",
        );
    }

    let page_text = doc.text().to_lowercase();
    let found = found_requirements(&page_text, requirements).len();
    let total = requirements.len();
    tracing::debug!(
        found,
        total,
        coverage = percentage(found, total),
        "requirement coverage"
    );

    CheckResult::new(
        CheckKind::ContentRequirements,
        grade_percentage(found, total, 70, 40),
        format!("Found {found}/{total} requirements"),
    )
}
