//! `prd-validator validate <url>`: run one validation and print the report.

use crate::cli::output::{self, Styled};
use crate::config::ValidatorConfig;
use crate::pipeline::Validator;
use anyhow::{Context, Result};
use prd_validator::{OverallStatus, ValidationReport};
use std::path::Path;

/// Where the PRD text comes from.
#[derive(Debug, Clone)]
pub enum PrdSource<'a> {
    File(&'a Path),
    Inline(&'a str),
}

impl PrdSource<'_> {
    /// Load the PRD text.
    pub fn load(&self) -> Result<String> {
        match self {
            PrdSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read PRD file {}", path.display())),
            PrdSource::Inline(text) => Ok(text.to_string()),
        }
    }
}

/// Run the validate command and return the report.
pub async fn run(url: &str, prd: PrdSource<'_>, config: ValidatorConfig) -> Result<ValidationReport> {
    let prd_text = prd.load()?;
    let validator = Validator::chromium(config)?;

    if !output::is_quiet() && !output::is_json() {
        eprintln!("  Validating {url}...");
    }

    let report = validator.run(url, &prd_text).await;

    if output::is_json() {
        output::print_json(&report);
    } else if !output::is_quiet() {
        print_report(&report);
    }

    Ok(report)
}

fn print_report(report: &ValidationReport) {
    let s = Styled::new();
    println!();
    for test in report.tests() {
        println!(
            "  {} {:<22} {}",
            s.status_sym(test.status),
            test.name,
            test.details
        );
    }

    let summary = report.summary();
    println!();
    println!(
        "  {} tests: {} passed, {} warnings, {} failed",
        summary.total_tests, summary.passed, summary.warnings, summary.failed
    );
    let verdict = match report.overall_status() {
        OverallStatus::Passed => s.ok_sym(),
        OverallStatus::Warning => s.warn_sym(),
        _ => s.fail_sym(),
    };
    println!("  {verdict} Overall: {}", report.overall_status());
    if let Some(message) = report.error_message() {
        println!("  Error: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_prd_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Login button\nFast").unwrap();
        let text = PrdSource::File(file.path()).load().unwrap();
        assert!(text.starts_with("Login button"));
    }

    #[test]
    fn test_missing_prd_file_is_error() {
        let err = PrdSource::File(Path::new("/nonexistent/prd.md"))
            .load()
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to read PRD file"));
    }

    #[test]
    fn test_inline_prd() {
        assert_eq!(PrdSource::Inline("Search bar").load().unwrap(), "Search bar");
    }
}
