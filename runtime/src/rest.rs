// Copyright 2026 PRD Validator Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API for PRD Validator.
//!
//! A thin layer over [`Validator::run`]: it accepts the URL and PRD text,
//! records the run in the [`RunRegistry`] and forwards the report
//! unchanged.

use crate::pipeline::Validator;
use crate::registry::RunRegistry;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use prd_validator::ValidationReport;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

/// Response header carrying the run id of a validation.
pub const VALIDATION_ID_HEADER: &str = "x-validation-id";

/// State shared by all handlers.
pub struct AppState {
    pub validator: Validator,
    pub registry: RunRegistry,
}

impl AppState {
    pub fn new(validator: Validator) -> Self {
        Self {
            validator,
            registry: RunRegistry::new(),
        }
    }
}

/// Body of `POST /validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub website_url: Option<String>,
    pub prd_content: Option<String>,
}

/// Build the axum Router with all REST endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/validate", post(handle_validate))
        .route("/upload-prd", post(handle_upload_prd))
        .route("/api/v1/validations/:id", get(handle_get_validation))
        .layer(cors)
        .with_state(state)
}

/// Start the REST API server on `host:port`.
pub async fn start(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("REST API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_validate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    let (Some(url), Some(prd)) = (non_empty(req.website_url), non_empty(req.prd_content)) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Both website URL and PRD content are required",
        );
    };

    let id = state.registry.begin(&url);
    tracing::info!(%id, %url, "validation requested");

    // The run finishes and is recorded even if the client goes away
    let run = {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let report = state.validator.run(&url, &prd).await;
            state.registry.complete(id, report.clone());
            report
        })
    };
    let report = match run.await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(%id, "validation task failed: {e}");
            let mut report = ValidationReport::pending();
            report.fail_with(format!("validation task failed: {e}"));
            state.registry.complete(id, report.clone());
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(VALIDATION_ID_HEADER, id.to_string())],
                Json(report),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        [(VALIDATION_ID_HEADER, id.to_string())],
        Json(report),
    )
        .into_response()
}

async fn handle_upload_prd(mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.body_text()),
        };
        if field.name() != Some("file") {
            continue;
        }
        // A `file` part without a filename is a plain form field, not an upload
        match field.file_name() {
            None => continue,
            Some("") => return error_response(StatusCode::BAD_REQUEST, "No file selected"),
            Some(_) => {}
        }

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.body_text()),
        };
        return match String::from_utf8(bytes.to_vec()) {
            Ok(content) => Json(json!({ "content": content })).into_response(),
            Err(_) => error_response(StatusCode::BAD_REQUEST, "File is not valid UTF-8"),
        };
    }

    error_response(StatusCode::BAD_REQUEST, "No file uploaded")
}

async fn handle_get_validation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = Uuid::parse_str(&id) else {
        return error_response(StatusCode::BAD_REQUEST, format!("invalid validation id: {id}"));
    };
    match state.registry.get(&id) {
        Some(record) => Json(record).into_response(),
        None => error_response(StatusCode::NOT_FOUND, format!("validation {id} not found")),
    }
}
