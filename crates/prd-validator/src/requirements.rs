//! Keyword-based requirement extraction from free-text PRD content.
//!
//! Matching is plain substring containment, not whole-word: "buttons",
//! "Button" and words such as "whereabouts" all match their keyword.

use serde::{Deserialize, Serialize};

/// Vocabulary that marks a PRD line as a requirement.
pub const REQUIREMENT_KEYWORDS: [&str; 19] = [
    "button",
    "form",
    "input",
    "link",
    "image",
    "text",
    "title",
    "header",
    "footer",
    "navigation",
    "menu",
    "search",
    "login",
    "register",
    "contact",
    "about",
    "home",
    "product",
    "service",
];

/// A normalized (trimmed, lowercased) PRD line containing a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Requirement(String);

impl Requirement {
    /// Normalize `line` and keep it if it mentions any keyword.
    pub fn from_line(line: &str) -> Option<Self> {
        let normalized = line.trim().to_lowercase();
        REQUIREMENT_KEYWORDS
            .iter()
            .any(|kw| normalized.contains(kw))
            .then_some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-separated words of the line.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract requirement lines from `prd_text`, in order and without dedup.
pub fn extract_requirements(prd_text: &str) -> Vec<Requirement> {
    let requirements: Vec<Requirement> = prd_text
        .lines()
        .filter_map(Requirement::from_line)
        .collect();
    tracing::debug!(count = requirements.len(), "extracted PRD requirements");
    requirements
}
