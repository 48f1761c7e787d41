//! Completion proxy handlers
//!
//! Normalizes incoming chat requests and relays them to the upstream API

use crate::handlers::AppState;
use crate::models::chat::ProxyRequest;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::create_request_log_summary;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle completion requests
///
/// POST /api/openai
///
/// Accepts either the raw OpenAI message shape or the structured
/// {system, user} form, fills in app defaults for anything omitted, and
/// relays the upstream response without rewriting it.
pub async fn completions(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Response> {
    // Key check runs before body validation. Without a key nothing is
    // read and nothing is sent upstream.
    if !state.settings.upstream_configured() {
        return Err(AppError::MissingApiKey);
    }

    let Json(body) = body.map_err(|rejection| {
        warn!("Request body rejected: {}", rejection.body_text());
        AppError::InvalidRequest(rejection.body_text())
    })?;

    let request = ProxyRequest::from_value(body).map_err(|message| {
        warn!("Request validation failed: {}", message);
        AppError::InvalidRequest(message)
    })?;

    let upstream_request = request.resolve(&state.settings.upstream.defaults);

    let log_summary = create_request_log_summary(&upstream_request);
    if let Ok(summary_json) = serde_json::to_string_pretty(&log_summary) {
        debug!("Resolved upstream request:\n{}", summary_json);
    }

    // Exactly one upstream attempt, the caller owns retry policy
    let completion = state.provider.create_completion(upstream_request).await?;

    debug!("Completion request processed");
    Ok(Json(completion).into_response())
}

/// Reject non-POST methods on the completion endpoint
///
/// Answers 405 with an Allow header naming the only accepted method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
