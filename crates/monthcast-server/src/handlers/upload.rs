//! Multipart upload extraction shared by the page and API handlers

use axum::{extract::Multipart, http::StatusCode};
use tracing::debug;

use crate::{AppError, MAX_UPLOAD_SIZE};

/// Read the `file` field of a multipart form.
///
/// Other fields are ignored.
pub async fn read_csv_upload(mut multipart: Multipart) -> Result<Vec<u8>, AppError> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(&format!("Failed to read form field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" {
            continue;
        }

        let filename = field.file_name().map(|s| s.to_string());
        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::payload_too_large()
            } else {
                AppError::bad_request("Failed to read file data")
            }
        })?;

        // Check file size limit
        if bytes.len() > MAX_UPLOAD_SIZE {
            return Err(AppError::payload_too_large());
        }

        debug!(
            filename = filename.as_deref().unwrap_or("<unnamed>"),
            size = bytes.len(),
            "Received CSV upload"
        );
        file_data = Some(bytes.to_vec());
    }

    let file_data = file_data.ok_or_else(|| AppError::bad_request("Missing file field"))?;
    if file_data.is_empty() {
        return Err(AppError::bad_request("Uploaded file is empty"));
    }

    Ok(file_data)
}
