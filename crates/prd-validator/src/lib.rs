//! PRD Validator: core model for website validation reports.
//!
//! Holds the parts of a validation run that need no network or browser:
//! the report data model, status aggregation, and keyword-based
//! requirement extraction from free-text product documents.

pub mod report;
pub mod requirements;

pub use report::{
    aggregate, CheckKind, CheckResult, CheckStatus, OverallStatus, Summary, ValidationReport,
};
pub use requirements::{extract_requirements, Requirement, REQUIREMENT_KEYWORDS};
