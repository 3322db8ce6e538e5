//! JSON bodies returned by the upload endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::artifact::ArtifactKind;
use super::upload::{ContentStats, GeneratedFiles, PayloadKind, UploadOutcome};
use super::video::VideoOutcome;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextUploadData {
    pub original_file_name: String,
    pub saved_file_name: String,
    pub generated_files: GeneratedFiles,
    pub summary: String,
    pub processed_data: ContentStats,
    /// Artifact kind to failure message, omitted when every artifact was stored
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub failures: BTreeMap<ArtifactKind, String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TextUploadResponse {
    pub success: bool,
    #[schema(example = "Text file processed successfully")]
    pub message: String,
    pub data: TextUploadData,
}

impl From<UploadOutcome> for TextUploadResponse {
    fn from(outcome: UploadOutcome) -> Self {
        let message = match outcome.payload_kind {
            PayloadKind::StructuredJson => "Text file processed successfully",
            PayloadKind::RawText => "Binary text file processed successfully",
        };

        Self {
            success: true,
            message: message.to_string(),
            data: TextUploadData {
                original_file_name: outcome.original_file_name,
                saved_file_name: outcome.saved_file_name,
                generated_files: outcome.generated_files,
                summary: outcome.summary,
                processed_data: outcome.processed_data,
                failures: outcome.failures,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoUploadData {
    pub file_name: String,
    /// Size in bytes
    pub file_size: u64,
    pub file_path: String,
    pub upload_date: DateTime<Utc>,
    pub saved_file_name: String,
    pub summary: String,
    pub summary_file: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoUploadResponse {
    pub success: bool,
    #[schema(example = "Video uploaded successfully")]
    pub message: String,
    pub data: VideoUploadData,
}

impl From<VideoOutcome> for VideoUploadResponse {
    fn from(outcome: VideoOutcome) -> Self {
        let video = outcome.video;
        Self {
            success: true,
            message: "Video uploaded successfully".to_string(),
            data: VideoUploadData {
                file_name: video.original_name,
                file_size: video.stored.size_bytes,
                file_path: video.stored.storage_key,
                upload_date: video.uploaded_at,
                saved_file_name: video.stored.logical_name,
                summary: outcome.summary,
                summary_file: outcome.summary_file,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,
    #[schema(example = "Server is running")]
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "OK".to_string(),
            message: "Server is running".to_string(),
        }
    }
}
