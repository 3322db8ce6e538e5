use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

use crate::sanitize::sanitize;

/// The kinds of document derived from one uploaded text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactKind {
    /// BPMN-like process diagram
    Process,
    /// Product requirements document (Markdown)
    Requirements,
    /// DMN-like decision model
    DecisionModel,
    /// Plain-text executive summary
    Summary,
}

impl ArtifactKind {
    /// Every kind, in the order artifacts are reported.
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Process,
        ArtifactKind::Requirements,
        ArtifactKind::DecisionModel,
        ArtifactKind::Summary,
    ];

    /// Whether the artifact is an XML markup document.
    pub fn is_markup(&self) -> bool {
        matches!(self, ArtifactKind::Process | ArtifactKind::DecisionModel)
    }
}

impl Display for ArtifactKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ArtifactKind::Process => write!(f, "process"),
            ArtifactKind::Requirements => write!(f, "requirements"),
            ArtifactKind::DecisionModel => write!(f, "decision_model"),
            ArtifactKind::Summary => write!(f, "summary"),
        }
    }
}

/// One generation to perform: the artifact kind and the sanitized content.
///
/// `sanitized_content` is `None` when the input did not survive sanitization;
/// such a request yields the kind's placeholder without calling the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub kind: ArtifactKind,
    pub sanitized_content: Option<String>,
}

impl GenerationRequest {
    pub fn new(kind: ArtifactKind, content: Option<&str>) -> Self {
        Self {
            kind,
            sanitized_content: sanitize(content),
        }
    }
}

/// Outcome of one generation. Always carries usable text: either the
/// normalized model output or the kind's placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub kind: ArtifactKind,
    pub text: String,
    pub succeeded: bool,
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn success(kind: ArtifactKind, text: String) -> Self {
        Self {
            kind,
            text,
            succeeded: true,
            error: None,
        }
    }

    pub fn degraded(kind: ArtifactKind, placeholder: &str, error: impl Into<String>) -> Self {
        Self {
            kind,
            text: placeholder.to_string(),
            succeeded: false,
            error: Some(error.into()),
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// A file persisted by the artifact store. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArtifact {
    /// File name within its category (what callers see)
    pub logical_name: String,
    /// Category-qualified key inside the store
    pub storage_key: String,
    pub size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::TRUNCATION_MARKER;

    #[test]
    fn test_generation_request_sanitizes_content() {
        let request = GenerationRequest::new(ArtifactKind::Summary, Some("  text  "));
        assert_eq!(request.sanitized_content.as_deref(), Some("text"));

        let empty = GenerationRequest::new(ArtifactKind::Process, Some("   "));
        assert!(empty.sanitized_content.is_none());
    }

    #[test]
    fn test_generation_request_truncates() {
        let long = "x".repeat(20_000);
        let request = GenerationRequest::new(ArtifactKind::Requirements, Some(&long));
        assert!(request
            .sanitized_content
            .unwrap()
            .ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_artifact_kind_serializes_camel_case() {
        let json = serde_json::to_string(&ArtifactKind::DecisionModel).unwrap();
        assert_eq!(json, "\"decisionModel\"");
    }

    #[test]
    fn test_degraded_result_carries_placeholder() {
        let result = GenerationResult::degraded(ArtifactKind::Summary, "fallback", "boom");
        assert!(!result.succeeded);
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert_eq!(result.into_text(), "fallback");
    }
}
