//! Suggestion and summary handlers
//!
//! Both endpoints take the raw body and decode it themselves so that a
//! malformed payload can be answered in the endpoint's own format instead of
//! axum's default rejection.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::{AppError, AppState};
use spendwise_core::SpendingSummary;

fn record_count(payload: &Value) -> usize {
    payload.as_array().map(Vec::len).unwrap_or(0)
}

/// POST /suggest - Budgeting tips for a JSON array of expense records
///
/// Always answers 200 with a JSON array of strings. An unreadable body
/// (including one over the size limit) or an undecodable one produces a
/// single `Error: ...` entry.
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Json<Vec<String>> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(
                status = %rejection.status(),
                error = %rejection.body_text(),
                "Unreadable suggestion request body"
            );
            return Json(vec![format!("Error: {}", rejection.body_text())]);
        }
    };

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, bytes = body.len(), "Malformed suggestion request body");
            return Json(vec![format!("Error: {}", e)]);
        }
    };

    let suggestions = state.analyzer.analyze_json(&payload);

    info!(
        records = record_count(&payload),
        suggestions = suggestions.len(),
        "Generated suggestions"
    );

    Json(suggestions)
}

/// POST /summary - Window statistics for a JSON array of expense records
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SpendingSummary>, AppError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))?;

    let summary = state
        .analyzer
        .summarize_json(&payload)
        .map_err(|e| AppError::bad_request(&e.to_string()))?;

    info!(
        records = summary.total_records,
        recent = summary.recent_records,
        "Generated spending summary"
    );

    Ok(Json(summary))
}
