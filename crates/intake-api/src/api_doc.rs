//! OpenAPI documentation, served at `/api/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use intake_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Intake API",
        version = "0.1.0",
        description = "Accepts text and video uploads, stores them, and generates a process diagram, requirements document, decision model and summary from uploaded text."
    ),
    paths(
        handlers::health::health_check,
        handlers::text_upload::upload_text,
        handlers::text_upload::upload_text_binary,
        handlers::video_upload::upload_video,
        handlers::download::download_file,
    ),
    components(
        schemas(
            models::ArtifactKind,
            models::PayloadKind,
            models::ContentStats,
            models::GeneratedFiles,
            models::TextUploadData,
            models::TextUploadResponse,
            models::VideoUploadData,
            models::VideoUploadResponse,
            models::HealthResponse,
            handlers::text_upload::TextUploadRequest,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "uploads", description = "Text and video uploads"),
        (name = "downloads", description = "Stored source files and generated artifacts")
    )
)]
pub struct ApiDoc;
