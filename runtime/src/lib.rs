// Copyright 2026 PRD Validator Contributors
// SPDX-License-Identifier: Apache-2.0

//! PRD Validator runtime: validate live websites with a headless browser.
//!
//! Fetches a rendered page through an injected [`renderer::BrowserLauncher`],
//! runs the ten-check battery over it and aggregates the results into a
//! [`prd_validator::ValidationReport`].

pub mod checks;
pub mod cli;
pub mod config;
pub mod dom;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod pipeline;
pub mod registry;
pub mod renderer;
pub mod rest;

pub use error::{FetchError, ValidatorError};
pub use pipeline::Validator;
