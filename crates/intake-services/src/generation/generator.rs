use intake_core::models::{ArtifactKind, GenerationRequest, GenerationResult, VideoUpload};
use std::sync::Arc;
use std::time::Instant;

use super::model::LanguageModel;
use super::normalize::normalize;
use super::prompts::{placeholder, prompt_for, video_description, Degradation};

/// Produces artifacts from sanitized content.
///
/// Every operation returns a [`GenerationResult`]; failures are logged and
/// replaced with the kind's placeholder, never propagated.
#[derive(Clone)]
pub struct ArtifactGenerator {
    model: Arc<dyn LanguageModel>,
}

impl ArtifactGenerator {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Run one generation request. At most one model call is made.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let kind = request.kind;
        let Some(content) = request.sanitized_content.as_deref() else {
            tracing::debug!(kind = %kind, "No usable content, skipping generation");
            return GenerationResult::degraded(
                kind,
                &placeholder(kind, Degradation::NoContent),
                "No valid content provided",
            );
        };

        let start = Instant::now();
        match self.model.complete(&prompt_for(kind, content)).await {
            Ok(raw) => {
                tracing::info!(
                    kind = %kind,
                    succeeded = true,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Artifact generated"
                );
                GenerationResult::success(kind, normalize(kind, &raw))
            }
            Err(e) => {
                tracing::warn!(
                    kind = %kind,
                    succeeded = false,
                    error = %e,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Artifact generation failed, using placeholder"
                );
                GenerationResult::degraded(
                    kind,
                    &placeholder(kind, Degradation::CallFailed),
                    e.client_message(),
                )
            }
        }
    }

    pub async fn generate_summary(&self, content: Option<&str>) -> GenerationResult {
        self.generate(&GenerationRequest::new(ArtifactKind::Summary, content))
            .await
    }

    pub async fn generate_process_diagram(&self, content: Option<&str>) -> GenerationResult {
        self.generate(&GenerationRequest::new(ArtifactKind::Process, content))
            .await
    }

    pub async fn generate_requirements_doc(&self, content: Option<&str>) -> GenerationResult {
        self.generate(&GenerationRequest::new(ArtifactKind::Requirements, content))
            .await
    }

    pub async fn generate_decision_model(&self, content: Option<&str>) -> GenerationResult {
        self.generate(&GenerationRequest::new(ArtifactKind::DecisionModel, content))
            .await
    }

    /// Summarize a video from its metadata only.
    ///
    /// On failure the text reads `Summary generation failed: {reason}`, where
    /// the reason is the client-safe one carried by the result.
    pub async fn describe_video(&self, video: &VideoUpload) -> GenerationResult {
        let description = video_description(video);
        let result = self.generate_summary(Some(&description)).await;
        if result.succeeded {
            return result;
        }

        let error = result.error.unwrap_or_default();
        let notice = format!("Summary generation failed: {}", error);
        GenerationResult::degraded(ArtifactKind::Summary, &notice, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::mock::{FailingLanguageModel, MockLanguageModel};
    use crate::generation::normalize::XML_PROLOGUE;
    use crate::generation::prompts::SUMMARY_FAILED;
    use intake_core::models::StoredArtifact;
    use intake_core::{MAX_CONTENT_CHARS, TRUNCATION_MARKER};

    #[tokio::test]
    async fn test_blank_content_never_calls_model() {
        let model = Arc::new(MockLanguageModel::responding("unused"));
        let generator = ArtifactGenerator::new(model.clone());

        for content in [None, Some(""), Some("   \n\t")] {
            let summary = generator.generate_summary(content).await;
            assert_eq!(summary.text, SUMMARY_FAILED);
            assert!(!summary.succeeded);

            let process = generator.generate_process_diagram(content).await;
            assert!(process.text.contains("No valid content"));

            let prd = generator.generate_requirements_doc(content).await;
            assert!(prd.text.starts_with("# PRD generation failed. No valid content"));

            let dmn = generator.generate_decision_model(content).await;
            assert!(dmn.text.contains("Invalid content"));
        }

        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failures_degrade_to_placeholders() {
        let model = Arc::new(FailingLanguageModel::new());
        let generator = ArtifactGenerator::new(model.clone());

        for kind in ArtifactKind::ALL {
            let result = generator
                .generate(&GenerationRequest::new(kind, Some("real content")))
                .await;
            assert!(!result.succeeded);
            assert_eq!(result.error.as_deref(), Some("language model unreachable"));
            assert!(!result.text.contains("connection refused"));
            if kind.is_markup() {
                assert!(result.text.starts_with(XML_PROLOGUE));
            }
        }

        assert_eq!(model.call_count(), 4);
    }

    #[tokio::test]
    async fn test_one_call_per_request() {
        let model = Arc::new(MockLanguageModel::responding("text"));
        let generator = ArtifactGenerator::new(model.clone());

        generator.generate_summary(Some("content")).await;
        generator.generate_requirements_doc(Some("content")).await;

        assert_eq!(model.call_count(), 2);
    }

    #[tokio::test]
    async fn test_process_output_is_normalized() {
        let model = Arc::new(MockLanguageModel::responding(
            "```xml\n<definitions id=\"d\"/>\n```",
        ));
        let generator = ArtifactGenerator::new(model);

        let result = generator.generate_process_diagram(Some("steps")).await;

        assert!(result.succeeded);
        assert_eq!(
            result.text,
            format!("{XML_PROLOGUE}\n<definitions id=\"d\"/>")
        );
    }

    #[tokio::test]
    async fn test_long_content_is_truncated_before_sending() {
        let model = Arc::new(MockLanguageModel::responding("ok"));
        let generator = ArtifactGenerator::new(model.clone());
        let long = "a".repeat(MAX_CONTENT_CHARS * 2);

        generator.generate_summary(Some(&long)).await;

        let prompt = &model.prompts()[0];
        assert!(prompt.contains(TRUNCATION_MARKER));
        assert!(!prompt.contains(&"a".repeat(MAX_CONTENT_CHARS + 1)));
    }

    #[tokio::test]
    async fn test_describe_video() {
        let video = VideoUpload::new(
            "talk.webm",
            StoredArtifact {
                logical_name: "video-1-abcdefgh.webm".into(),
                storage_key: "videos/video-1-abcdefgh.webm".into(),
                size_bytes: 1024,
            },
        );

        let model = Arc::new(MockLanguageModel::responding("A short talk."));
        let ok = ArtifactGenerator::new(model.clone()).describe_video(&video).await;
        assert!(ok.succeeded);
        assert_eq!(ok.text, "A short talk.");
        assert!(model.prompts()[0].contains("File Name: talk.webm"));

        let failed = ArtifactGenerator::new(Arc::new(FailingLanguageModel::new()))
            .describe_video(&video)
            .await;
        assert!(!failed.succeeded);
        assert_eq!(
            failed.text,
            "Summary generation failed: language model unreachable"
        );
        assert!(!failed.text.contains("connection refused"));
    }
}
