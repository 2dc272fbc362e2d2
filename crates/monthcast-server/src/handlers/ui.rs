//! HTML page handlers

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Response},
};
use tracing::info;

use super::upload::read_csv_upload;
use crate::{pages, AppError, AppState};

/// GET / - Upload form
pub async fn index_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::render_index(&state.config, None))
}

/// POST /analyze - Upload form submission, renders the full report
///
/// Failures re-render the upload form with the error message.
pub async fn analyze_page(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    match run_page_pass(&state, multipart).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            err.log();
            let page = pages::render_index(&state.config, Some(err.message()));
            (err.status(), Html(page)).into_response()
        }
    }
}

async fn run_page_pass(state: &AppState, multipart: Multipart) -> Result<String, AppError> {
    let file_data = read_csv_upload(multipart).await?;
    let analysis = state.run_pass(&file_data)?;

    info!(observations = analysis.len(), "Rendered analysis page");

    Ok(pages::render_results(&state.config, &analysis))
}
