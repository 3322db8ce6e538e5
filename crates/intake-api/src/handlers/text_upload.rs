//! Text upload handlers.
//!
//! `POST /api/upload/text` accepts either a JSON document `{fileName, content}`
//! or a `text/*` body; `POST /api/upload/text-binary` always treats the body as
//! raw UTF-8 text.

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::utils::upload::normalize_mime_type;
use axum::{
    extract::{FromRequest, Query, Request, State},
    http::header::CONTENT_TYPE,
    Json,
};
use bytes::Bytes;
use intake_core::models::{TextUploadResponse, UploadPayload};
use intake_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

/// File name used for raw uploads that do not name themselves.
pub const RAW_UPLOAD_NAME: &str = "binary_upload.txt";

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextUploadRequest {
    #[serde(default)]
    #[schema(example = "meeting-notes.txt")]
    pub file_name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RawUploadQuery {
    /// Name to store a raw text body under
    pub file_name: Option<String>,
}

enum BodyKind {
    Json,
    Text,
}

fn body_kind(request: &Request) -> Result<BodyKind, AppError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| normalize_mime_type(value).to_lowercase())
        .unwrap_or_default();

    if content_type == "application/json" || content_type.ends_with("+json") {
        Ok(BodyKind::Json)
    } else if content_type.starts_with("text/") {
        Ok(BodyKind::Text)
    } else {
        Err(AppError::UnsupportedMediaType(format!(
            "Unsupported content type '{}'; send application/json or text/*",
            content_type
        )))
    }
}

async fn read_text_body(request: Request) -> Result<String, HttpAppError> {
    let body = Bytes::from_request(request, &()).await?;
    String::from_utf8(body.to_vec()).map_err(|_| {
        HttpAppError::from(AppError::InvalidInput(
            "Request body is not valid UTF-8 text".to_string(),
        ))
    })
}

fn raw_file_name(query: RawUploadQuery) -> String {
    query
        .file_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| RAW_UPLOAD_NAME.to_string())
}

async fn process(
    state: &AppState,
    payload: UploadPayload,
) -> Result<Json<TextUploadResponse>, HttpAppError> {
    let outcome = state.orchestrator.process_text(payload).await?;

    tracing::info!(
        saved_file_name = %outcome.saved_file_name,
        complete = outcome.is_complete(),
        "Text upload processed"
    );

    Ok(Json(outcome.into()))
}

#[utoipa::path(
    post,
    path = "/api/upload/text",
    tag = "uploads",
    params(RawUploadQuery),
    request_body(
        content = TextUploadRequest,
        content_type = "application/json",
        description = "JSON document; a text/* body is accepted as a raw upload"
    ),
    responses(
        (status = 200, description = "Text processed; see generatedFiles for each artifact", body = TextUploadResponse),
        (status = 400, description = "Missing or empty fields", body = ErrorResponse),
        (status = 413, description = "Body too large", body = ErrorResponse),
        (status = 415, description = "Unsupported content type", body = ErrorResponse),
        (status = 500, description = "Source text could not be stored", body = ErrorResponse)
    )
)]
pub async fn upload_text(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RawUploadQuery>,
    request: Request,
) -> Result<Json<TextUploadResponse>, HttpAppError> {
    let payload = match body_kind(&request)? {
        BodyKind::Json => {
            let ValidatedJson(body) =
                ValidatedJson::<TextUploadRequest>::from_request(request, &()).await?;
            UploadPayload::structured(
                body.file_name.unwrap_or_default(),
                body.content.unwrap_or_default(),
            )
        }
        BodyKind::Text => {
            let content = read_text_body(request).await?;
            UploadPayload::raw(raw_file_name(query), content)
        }
    };

    process(&state, payload).await
}

#[utoipa::path(
    post,
    path = "/api/upload/text-binary",
    tag = "uploads",
    params(RawUploadQuery),
    request_body(content = String, content_type = "text/plain"),
    responses(
        (status = 200, description = "Text processed; see generatedFiles for each artifact", body = TextUploadResponse),
        (status = 400, description = "No content received", body = ErrorResponse),
        (status = 413, description = "Body too large", body = ErrorResponse),
        (status = 500, description = "Source text could not be stored", body = ErrorResponse)
    )
)]
pub async fn upload_text_binary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RawUploadQuery>,
    request: Request,
) -> Result<Json<TextUploadResponse>, HttpAppError> {
    let content = read_text_body(request).await?;
    process(&state, UploadPayload::raw(raw_file_name(query), content)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(content_type: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/api/upload/text");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_body_kind_by_content_type() {
        assert!(matches!(
            body_kind(&request_with(Some("application/json"))),
            Ok(BodyKind::Json)
        ));
        assert!(matches!(
            body_kind(&request_with(Some("application/vnd.api+json"))),
            Ok(BodyKind::Json)
        ));
        assert!(matches!(
            body_kind(&request_with(Some("text/plain; charset=utf-8"))),
            Ok(BodyKind::Text)
        ));
        assert!(matches!(
            body_kind(&request_with(Some("text/markdown"))),
            Ok(BodyKind::Text)
        ));
    }

    #[test]
    fn test_body_kind_rejects_other_types() {
        assert!(matches!(
            body_kind(&request_with(Some("application/octet-stream"))),
            Err(AppError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            body_kind(&request_with(None)),
            Err(AppError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_raw_file_name_defaults() {
        assert_eq!(raw_file_name(RawUploadQuery { file_name: None }), RAW_UPLOAD_NAME);
        assert_eq!(
            raw_file_name(RawUploadQuery {
                file_name: Some("  ".into())
            }),
            RAW_UPLOAD_NAME
        );
        assert_eq!(
            raw_file_name(RawUploadQuery {
                file_name: Some("notes.md".into())
            }),
            "notes.md"
        );
    }
}
