//! Helpers for reading uploaded files out of requests

use axum::extract::Multipart;
use intake_core::AppError;

use crate::error::HttpAppError;

/// One file pulled from a multipart form.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Extract the single file sent under `field`.
///
/// Other fields are ignored; sending `field` twice is rejected.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    field: &str,
) -> Result<UploadedFile, HttpAppError> {
    let mut found: Option<UploadedFile> = None;

    while let Some(part) = multipart.next_field().await? {
        if part.name() != Some(field) {
            continue;
        }
        if found.is_some() {
            return Err(AppError::InvalidInput(format!(
                "Multiple file fields are not allowed; send exactly one field named '{}'",
                field
            ))
            .into());
        }

        let file_name = part
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "unknown".to_string());
        let content_type = part
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let data = part.bytes().await?;

        found = Some(UploadedFile {
            data: data.to_vec(),
            file_name,
            content_type,
        });
    }

    found.ok_or_else(|| {
        HttpAppError::from(AppError::InvalidInput(format!(
            "No file provided in field '{}'",
            field
        )))
    })
}

/// Normalize MIME type by stripping parameters (e.g. "text/plain; charset=utf-8" -> "text/plain").
pub fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}
