//! `prd-validator serve`: run the REST API.

use crate::config::ValidatorConfig;
use crate::pipeline::Validator;
use crate::rest::{self, AppState};
use anyhow::Result;
use std::sync::Arc;

/// Serve validations over HTTP until the process is stopped.
pub async fn run(host: &str, port: u16, config: ValidatorConfig) -> Result<()> {
    let validator = Validator::chromium(config)?;
    let state = Arc::new(AppState::new(validator));
    rest::start(host, port, state).await
}
