//! JSON API handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::upload::read_csv_upload;
use crate::{AppError, AppState, MAX_UPLOAD_SIZE};
use monthcast_core::{Analysis, Config};

/// Response for the health endpoint
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/config - Active column mapping, forecast and display settings
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<Config> {
    Json(state.config.clone())
}

/// POST /api/analyze - Analyze an uploaded CSV
///
/// Expects multipart form with:
/// - file: CSV file (required, max 10MB)
pub async fn analyze_upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<Analysis>, AppError> {
    let file_data = read_csv_upload(multipart).await?;
    analyze_core(&state, &file_data)
}

/// Analyze CSV data sent inline (for scripts and tests)
///
/// Request body contains:
/// - csv_data: Base64-encoded CSV content
#[derive(Debug, Deserialize)]
pub struct AnalyzeJsonRequest {
    pub csv_data: String,
}

/// POST /api/analyze/json - Analyze a base64-encoded CSV
pub async fn analyze_json(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeJsonRequest>, JsonRejection>,
) -> Result<Json<Analysis>, AppError> {
    use base64::Engine;

    let Json(req) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::payload_too_large()
        } else {
            AppError::bad_request(&rejection.body_text())
        }
    })?;

    let file_data = base64::engine::general_purpose::STANDARD
        .decode(req.csv_data.trim())
        .map_err(|e| AppError::bad_request(&format!("Invalid base64 data: {}", e)))?;

    // Check file size limit
    if file_data.len() > MAX_UPLOAD_SIZE {
        return Err(AppError::payload_too_large());
    }

    analyze_core(&state, &file_data)
}

/// Core analysis logic - separated from request parsing
fn analyze_core(state: &AppState, file_data: &[u8]) -> Result<Json<Analysis>, AppError> {
    let analysis = state.run_pass(file_data)?;

    info!(
        observations = analysis.len(),
        income_forecast = analysis.income.value(),
        expense_forecast = analysis.expense.value(),
        "Analysis complete"
    );

    Ok(Json(analysis))
}
