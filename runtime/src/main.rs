// Copyright 2026 PRD Validator Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use prd_validator_runtime::cli::{self, output};
use prd_validator_runtime::config::{
    ValidatorConfig, ENV_CHROMIUM_PATH, ENV_SETTLE_MS, ENV_WAIT_FOR,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "prd-validator",
    about = "PRD Validator: check a live website against quality heuristics and PRD requirements",
    version,
    after_help = "Run 'prd-validator <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Browser and timing overrides shared by commands that run validations.
#[derive(Args)]
struct BrowserArgs {
    /// Path to the Chromium binary
    #[arg(long, env = ENV_CHROMIUM_PATH)]
    chromium: Option<PathBuf>,

    /// Fixed delay after navigation before reading the page, in milliseconds
    #[arg(long, env = ENV_SETTLE_MS)]
    settle_ms: Option<u64>,

    /// Wait for this CSS selector after navigation instead of a fixed delay
    #[arg(long, env = ENV_WAIT_FOR)]
    wait_for: Option<String>,
}

impl BrowserArgs {
    fn into_config(self) -> ValidatorConfig {
        ValidatorConfig::default().with_overrides(self.chromium, self.settle_ms, self.wait_for)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a website against a PRD
    Validate {
        /// URL of the page to validate
        url: String,
        /// PRD file to extract requirements from
        #[arg(long, conflicts_with = "prd_text", required_unless_present = "prd_text")]
        prd: Option<PathBuf>,
        /// PRD content given inline
        #[arg(long)]
        prd_text: Option<String>,
        #[command(flatten)]
        browser: BrowserArgs,
    },
    /// Serve validations over an HTTP REST API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value = "5000")]
        port: u16,
        #[command(flatten)]
        browser: BrowserArgs,
    },
    /// Check environment and diagnose issues
    Doctor {
        #[command(flatten)]
        browser: BrowserArgs,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var(output::ENV_JSON, "1");
    }
    if cli.quiet {
        std::env::set_var(output::ENV_QUIET, "1");
    }
    if cli.no_color {
        std::env::set_var(output::ENV_NO_COLOR, "1");
    }
    cli::init_tracing(cli.verbose, cli.log_json);

    let result = match cli.command {
        Commands::Validate {
            url,
            prd,
            prd_text,
            browser,
        } => {
            let source = match (&prd, &prd_text) {
                (Some(path), _) => cli::validate_cmd::PrdSource::File(path),
                (None, text) => {
                    cli::validate_cmd::PrdSource::Inline(text.as_deref().unwrap_or(""))
                }
            };
            cli::validate_cmd::run(&url, source, browser.into_config())
                .await
                .map(|report| report.is_success())
        }
        Commands::Serve {
            host,
            port,
            browser,
        } => cli::serve_cmd::run(&host, port, browser.into_config())
            .await
            .map(|_| true),
        Commands::Doctor { browser } => cli::doctor::run(&browser.into_config())
            .await
            .map(|_| true),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "prd-validator", &mut std::io::stdout());
            Ok(true)
        }
    };

    // Exit codes: 0 = success, 1 = error or failed validation
    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            if output::is_json() {
                output::print_json(&serde_json::json!({
                    "error": true,
                    "message": format!("{e:#}"),
                }));
            } else if !output::is_quiet() {
                eprintln!("  Error: {e:#}");
            }
            std::process::exit(1);
        }
    }
}
