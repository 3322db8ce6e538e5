//! Stored file download.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use intake_storage::StorageCategory;
use std::sync::Arc;

/// Content type for a stored file, guessed from its extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => "text/plain; charset=utf-8",
        "md" => "text/markdown; charset=utf-8",
        "json" => "application/json",
        "csv" => "text/csv; charset=utf-8",
        "bpmn" | "dmn" | "xml" => "application/xml",
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

#[utoipa::path(
    get,
    path = "/api/upload/download/{category}/{file_name}",
    tag = "downloads",
    params(
        ("category" = String, Path, description = "One of texts, videos, process, requirements, decision, summaries"),
        ("file_name" = String, Path, description = "Stored file name as returned by an upload")
    ),
    responses(
        (status = 200, description = "File contents", content_type = "application/octet-stream"),
        (status = 400, description = "Unknown category or invalid file name", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path((category, file_name)): Path<(String, String)>,
) -> Result<Response, HttpAppError> {
    let category: StorageCategory = category.parse()?;
    let data = state.store.read(category, &file_name).await?;

    tracing::debug!(
        category = %category,
        file_name = %file_name,
        size_bytes = data.len(),
        "Serving stored file"
    );

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(content_type_for(&file_name)),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}
