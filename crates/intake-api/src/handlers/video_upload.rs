use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use crate::validation::{validate_video, VideoLimits};
use axum::{
    extract::{Multipart, State},
    Json,
};
use intake_core::models::{VideoUpload, VideoUploadResponse};
use std::sync::Arc;

/// Multipart field carrying the video.
pub const VIDEO_FIELD: &str = "video";

#[utoipa::path(
    post,
    path = "/api/upload/video",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video uploaded successfully", body = VideoUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Not a video", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<VideoUploadResponse>, HttpAppError> {
    let file = extract_multipart_file(multipart, VIDEO_FIELD).await?;

    let limits = VideoLimits {
        max_size_bytes: state.config.max_video_size_bytes,
        allowed_extensions: &state.config.video_allowed_extensions,
    };
    validate_video(&file.file_name, &file.content_type, file.data.len(), &limits)?;

    let stored = state.store.store_video(&file.file_name, file.data).await?;

    tracing::info!(
        original_name = %file.file_name,
        storage_key = %stored.storage_key,
        size_bytes = stored.size_bytes,
        "Video stored"
    );

    let video = VideoUpload::new(file.file_name, stored);
    let outcome = state.orchestrator.process_video(video).await;

    Ok(Json(outcome.into()))
}
