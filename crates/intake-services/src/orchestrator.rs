//! Upload orchestration
//!
//! Drives one upload through the pipeline: validate → store source → generate
//! each artifact → store artifacts → assemble outcome. Every artifact kind is
//! handled independently; a failure for one kind is recorded against that kind
//! and never fails the request.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use intake_core::models::{
    ArtifactKind, ArtifactRef, ContentStats, GeneratedFiles, GenerationRequest, GenerationResult,
    PayloadKind, UploadOutcome, UploadPayload, VideoOutcome, VideoUpload,
};
use intake_core::{AppError, GenerationMode};
use intake_storage::{
    artifact_file_name, video_summary_file_name, ArtifactStore, StorageCategory,
};

use crate::generation::ArtifactGenerator;

/// What happened to one artifact kind.
struct KindOutcome {
    kind: ArtifactKind,
    result: GenerationResult,
    stored: Result<String, String>,
}

/// Coordinates generation and storage for text and video uploads.
#[derive(Clone)]
pub struct UploadOrchestrator {
    generator: ArtifactGenerator,
    store: Arc<dyn ArtifactStore>,
    mode: GenerationMode,
}

impl UploadOrchestrator {
    pub fn new(
        generator: ArtifactGenerator,
        store: Arc<dyn ArtifactStore>,
        mode: GenerationMode,
    ) -> Self {
        Self {
            generator,
            store,
            mode,
        }
    }

    /// Process a text upload.
    ///
    /// Fails only when the payload is empty (before any write) or when the
    /// source text cannot be stored.
    pub async fn process_text(&self, payload: UploadPayload) -> Result<UploadOutcome, AppError> {
        // 1. Reject empty payloads before touching storage
        validate_payload(&payload)?;

        // 2. Persist the source text; nothing can be attributed without it
        let source = self
            .store
            .store_source_text(&payload.file_name, &payload.content)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    file_name = %payload.file_name,
                    "Failed to store source text"
                );
                AppError::from(e)
            })?;

        tracing::info!(
            original_file_name = %payload.file_name,
            saved_file_name = %source.logical_name,
            size_bytes = source.size_bytes,
            mode = ?self.mode,
            "Source text stored, generating artifacts"
        );

        // 3. Generate and store each artifact kind in isolation
        let outcomes = match self.mode {
            GenerationMode::Concurrent => {
                join_all(
                    ArtifactKind::ALL
                        .into_iter()
                        .map(|kind| self.produce(kind, &payload.content, &source.logical_name)),
                )
                .await
            }
            GenerationMode::Sequential => {
                let mut outcomes = Vec::with_capacity(ArtifactKind::ALL.len());
                for kind in ArtifactKind::ALL {
                    outcomes.push(
                        self.produce(kind, &payload.content, &source.logical_name)
                            .await,
                    );
                }
                outcomes
            }
        };

        // 4. Assemble the outcome; every kind gets an entry
        let mut generated_files = GeneratedFiles::default();
        let mut failures = BTreeMap::new();
        let mut summary = String::new();

        for outcome in outcomes {
            match outcome.stored {
                Ok(name) => generated_files.set(outcome.kind, ArtifactRef::Stored(name)),
                Err(message) => {
                    generated_files.set(outcome.kind, ArtifactRef::NotGenerated);
                    failures.insert(outcome.kind, message);
                }
            }
            if outcome.kind == ArtifactKind::Summary {
                summary = outcome.result.into_text();
            }
        }

        if !failures.is_empty() {
            tracing::warn!(
                saved_file_name = %source.logical_name,
                failed = failures.len(),
                "Upload processed with missing artifacts"
            );
        }

        Ok(UploadOutcome {
            original_file_name: payload.file_name,
            saved_file_name: source.logical_name,
            payload_kind: payload.kind,
            generated_files,
            summary,
            processed_data: ContentStats::from_content(&payload.content),
            failures,
        })
    }

    /// Summarize an already stored video from its metadata.
    ///
    /// Never fails: the stored video is the result, the summary is best effort.
    pub async fn process_video(&self, video: VideoUpload) -> VideoOutcome {
        let result = self.generator.describe_video(&video).await;

        let summary_file = if result.succeeded {
            let file_name = video_summary_file_name(&video.stored.logical_name);
            match self
                .store
                .store_generated_artifact(&file_name, &result.text, StorageCategory::Video)
                .await
            {
                Ok(stored) => Some(stored.logical_name),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        file_name = %file_name,
                        "Failed to store video summary"
                    );
                    None
                }
            }
        } else {
            None
        };

        VideoOutcome {
            video,
            summary: result.into_text(),
            summary_file,
        }
    }

    async fn produce(&self, kind: ArtifactKind, content: &str, source_name: &str) -> KindOutcome {
        let result = self
            .generator
            .generate(&GenerationRequest::new(kind, Some(content)))
            .await;

        if !result.succeeded {
            let message = result
                .error
                .clone()
                .unwrap_or_else(|| "Generation failed".to_string());
            tracing::warn!(kind = %kind, error = %message, "Artifact not generated");
            return KindOutcome {
                kind,
                result,
                stored: Err(message),
            };
        }

        let file_name = artifact_file_name(source_name, kind);
        let stored = self
            .store
            .store_generated_artifact(&file_name, &result.text, StorageCategory::for_artifact(kind))
            .await
            .map(|stored| stored.logical_name)
            .map_err(|e| {
                tracing::warn!(kind = %kind, error = %e, file_name = %file_name, "Failed to store artifact");
                format!("Failed to store {}", kind)
            });

        KindOutcome {
            kind,
            result,
            stored,
        }
    }
}

fn validate_payload(payload: &UploadPayload) -> Result<(), AppError> {
    let blank_name = payload.file_name.trim().is_empty();
    let blank_content = payload.content.trim().is_empty();

    match payload.kind {
        PayloadKind::StructuredJson if blank_name || blank_content => Err(
            AppError::InvalidInput("Missing required fields".to_string()),
        ),
        PayloadKind::RawText if blank_content => Err(AppError::InvalidInput(
            "No content received in binary file.".to_string(),
        )),
        PayloadKind::RawText if blank_name => Err(AppError::InvalidInput(
            "Missing file name".to_string(),
        )),
        _ if payload.file_name.chars().any(char::is_control) => Err(AppError::InvalidInput(
            "File name must not contain control characters".to_string(),
        )),
        _ => Ok(()),
    }
}
