//! Checks that only read the parsed document.

use super::{grade_percentage, percentage};
use crate::dom::{contains_tag, element_text, Document};
use prd_validator::{CheckKind, CheckResult, CheckStatus};

/// Meta `name`/`property` values worth having.
pub const IMPORTANT_META: [&str; 4] = ["description", "keywords", "viewport", "robots"];

/// Passed iff a `<title>` with non-blank text exists.
pub fn check_page_title(doc: &Document) -> CheckResult {
    let title = doc
        .find("title")
        .map(|el| element_text(&el).trim().to_string())
        .filter(|t| !t.is_empty());

    match title {
        Some(title) => CheckResult::passed(CheckKind::PageTitle, format!("Title: {title}")),
        None => CheckResult::failed(CheckKind::PageTitle, "No title found"),
    }
}

/// Passed with at least two distinct important meta tags, else warning.
pub fn check_meta_tags(doc: &Document) -> CheckResult {
    let mut found: Vec<&str> = Vec::new();
    for meta in doc.find_all("meta") {
        let name = meta.value().attr("name");
        let property = meta.value().attr("property");
        let important = |v: Option<&str>| v.is_some_and(|v| IMPORTANT_META.contains(&v));
        if !(important(name) || important(property)) {
            continue;
        }
        // Reported under its name, falling back to its property
        let label = name.filter(|n| !n.is_empty()).or(property).unwrap_or_default();
        if !found.contains(&label) {
            found.push(label);
        }
    }

    if found.len() >= 2 {
        CheckResult::passed(
            CheckKind::MetaTags,
            format!("Found meta tags: {}", found.join(", ")),
        )
    } else {
        CheckResult::warning(
            CheckKind::MetaTags,
            format!("Found only {} important meta tags", found.len()),
        )
    }
}

/// Alt-text coverage: passed >= 90%, warning >= 70%, else failed.
/// A page without images is a warning.
pub fn check_images(doc: &Document) -> CheckResult {
    let mut total = 0usize;
    let mut with_alt = 0usize;
    for img in doc.find_all("img") {
        total += 1;
        if img.value().attr("alt").is_some_and(|alt| !alt.is_empty()) {
            with_alt += 1;
        }
    }

    if total == 0 {
        return CheckResult::warning(CheckKind::Images, "No images found");
    }

    let status = grade_percentage(with_alt, total, 90, 70);
    CheckResult::new(
        CheckKind::Images,
        status,
        format!(
            "{with_alt}/{total} images have alt text ({:.1}%)",
            percentage(with_alt, total)
        ),
    )
}

/// Passed iff every form holds at least one `<input>`; never failed.
pub fn check_forms(doc: &Document) -> CheckResult {
    let mut total = 0usize;
    let mut valid = 0usize;
    for form in doc.find_all("form") {
        total += 1;
        if contains_tag(&form, "input") {
            valid += 1;
        }
    }

    if total == 0 {
        return CheckResult::warning(CheckKind::Forms, "No forms found");
    }

    let status = if valid == total {
        CheckStatus::Passed
    } else {
        CheckStatus::Warning
    };
    CheckResult::new(
        CheckKind::Forms,
        status,
        format!("{valid}/{total} forms have inputs"),
    )
}

/// Four SEO markers: `<h1>`, meta description, canonical link, microdata.
pub fn check_seo_elements(doc: &Document) -> CheckResult {
    const TOTAL: usize = 4;
    let markers = [
        doc.find("h1").is_some(),
        doc.find_by_attr_value("meta", "name", "description")
            .is_some(),
        doc.find_by_attr_token("link", "rel", "canonical").is_some(),
        doc.has_attr_anywhere("itemtype"),
    ];
    let score = markers.iter().filter(|m| **m).count();

    CheckResult::new(
        CheckKind::SeoElements,
        grade_percentage(score, TOTAL, 75, 50),
        format!(
            "SEO score: {score}/{TOTAL} ({:.1}%)",
            percentage(score, TOTAL)
        ),
    )
}
