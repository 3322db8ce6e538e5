//! Storage abstraction trait
//!
//! This module defines the [`ArtifactStore`] trait that storage backends implement,
//! the categories files are filed under, and the storage error type.

use async_trait::async_trait;
use intake_core::models::{ArtifactKind, StoredArtifact};
use intake_core::AppError;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("File not found: {}", key)),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Logical location a stored file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageCategory {
    SourceText,
    Video,
    Process,
    Requirements,
    DecisionModel,
    Summary,
}

impl StorageCategory {
    pub const ALL: [StorageCategory; 6] = [
        StorageCategory::SourceText,
        StorageCategory::Video,
        StorageCategory::Process,
        StorageCategory::Requirements,
        StorageCategory::DecisionModel,
        StorageCategory::Summary,
    ];

    /// Directory, relative to the store root.
    pub fn dir(&self) -> &'static str {
        match self {
            StorageCategory::SourceText => "texts",
            StorageCategory::Video => "videos",
            StorageCategory::Process => "generated/bpmn",
            StorageCategory::Requirements => "generated/prd",
            StorageCategory::DecisionModel => "generated/drd",
            StorageCategory::Summary => "generated/summaries",
        }
    }

    /// Name used in download URLs.
    pub fn route_name(&self) -> &'static str {
        match self {
            StorageCategory::SourceText => "texts",
            StorageCategory::Video => "videos",
            StorageCategory::Process => "process",
            StorageCategory::Requirements => "requirements",
            StorageCategory::DecisionModel => "decision",
            StorageCategory::Summary => "summaries",
        }
    }

    pub fn for_artifact(kind: ArtifactKind) -> Self {
        match kind {
            ArtifactKind::Process => StorageCategory::Process,
            ArtifactKind::Requirements => StorageCategory::Requirements,
            ArtifactKind::DecisionModel => StorageCategory::DecisionModel,
            ArtifactKind::Summary => StorageCategory::Summary,
        }
    }

    /// Storage key for a file name in this category.
    pub fn key_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.dir(), file_name)
    }
}

impl Display for StorageCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.route_name())
    }
}

impl FromStr for StorageCategory {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageCategory::ALL
            .into_iter()
            .find(|category| category.route_name() == s)
            .ok_or_else(|| StorageError::InvalidKey(format!("Unknown file category: {}", s)))
    }
}

/// Storage abstraction trait
///
/// Writes never overwrite: every name handed to the store is unique by
/// construction, so concurrent requests cannot collide on a path.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist uploaded source text under a freshly generated unique name.
    async fn store_source_text(
        &self,
        original_name: &str,
        content: &str,
    ) -> StorageResult<StoredArtifact>;

    /// Persist generated content under the exact `file_name` given.
    async fn store_generated_artifact(
        &self,
        file_name: &str,
        content: &str,
        category: StorageCategory,
    ) -> StorageResult<StoredArtifact>;

    /// Persist an uploaded video under a generated `video-{ms}-{token}.{ext}` name.
    async fn store_video(&self, original_name: &str, data: Vec<u8>)
        -> StorageResult<StoredArtifact>;

    /// Read a stored file back.
    async fn read(&self, category: StorageCategory, file_name: &str) -> StorageResult<Vec<u8>>;

    /// Check if a file exists
    async fn exists(&self, category: StorageCategory, file_name: &str) -> StorageResult<bool>;

    /// Create every category directory.
    async fn ensure_layout(&self) -> StorageResult<()>;
}
