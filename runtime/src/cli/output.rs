//! Shared terminal output helpers for CLI commands.
//!
//! Global flags are published as environment variables by `main` so every
//! command can consult them without threading arguments through.

use prd_validator::CheckStatus;
use serde::Serialize;

pub const ENV_JSON: &str = "PRD_VALIDATOR_JSON";
pub const ENV_QUIET: &str = "PRD_VALIDATOR_QUIET";
pub const ENV_NO_COLOR: &str = "PRD_VALIDATOR_NO_COLOR";

fn flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| v == "1")
}

/// Whether machine-readable JSON output was requested.
pub fn is_json() -> bool {
    flag(ENV_JSON)
}

/// Whether non-essential output should be suppressed.
pub fn is_quiet() -> bool {
    flag(ENV_QUIET)
}

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("  Error: failed to serialize output: {e}"),
    }
}

/// Status symbols, colored unless disabled.
pub struct Styled {
    color: bool,
}

impl Styled {
    pub fn new() -> Self {
        let color = !flag(ENV_NO_COLOR) && std::env::var_os("NO_COLOR").is_none();
        Self { color }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    pub fn ok_sym(&self) -> String {
        self.paint("32", "✓")
    }

    pub fn warn_sym(&self) -> String {
        self.paint("33", "!")
    }

    pub fn fail_sym(&self) -> String {
        self.paint("31", "✗")
    }

    pub fn status_sym(&self, status: CheckStatus) -> String {
        match status {
            CheckStatus::Passed => self.ok_sym(),
            CheckStatus::Warning => self.warn_sym(),
            CheckStatus::Failed => self.fail_sym(),
        }
    }
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}
