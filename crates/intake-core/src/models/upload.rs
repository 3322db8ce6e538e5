use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::artifact::ArtifactKind;

/// Text shown in place of an artifact name when that artifact was not produced.
pub const NOT_GENERATED: &str = "Not generated";

/// How the text arrived at the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum PayloadKind {
    /// Raw bytes interpreted as UTF-8 text
    RawText,
    /// JSON body with `fileName` and `content` fields
    StructuredJson,
}

/// A text upload, independent of how it was transported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    pub file_name: String,
    pub content: String,
    pub kind: PayloadKind,
}

impl UploadPayload {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>, kind: PayloadKind) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            kind,
        }
    }

    pub fn raw(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(file_name, content, PayloadKind::RawText)
    }

    pub fn structured(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(file_name, content, PayloadKind::StructuredJson)
    }
}

/// Simple statistics over the uploaded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    /// Number of characters
    pub content_length: usize,
    /// Newline-separated segments (an empty text counts as one line)
    pub line_count: usize,
    /// Maximal runs of non-whitespace characters
    pub word_count: usize,
}

impl ContentStats {
    pub fn from_content(content: &str) -> Self {
        Self {
            content_length: content.chars().count(),
            line_count: content.split('\n').count(),
            word_count: content.split_whitespace().count(),
        }
    }
}

/// Reference to a generated artifact in an upload response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArtifactRef {
    Stored(String),
    #[default]
    NotGenerated,
}

impl ArtifactRef {
    pub fn is_stored(&self) -> bool {
        matches!(self, ArtifactRef::Stored(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ArtifactRef::Stored(name) => name,
            ArtifactRef::NotGenerated => NOT_GENERATED,
        }
    }
}

impl Serialize for ArtifactRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Stored names of the four generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFiles {
    #[schema(value_type = String, example = "notes-1700000000000-k3j9x2ab_process.bpmn")]
    pub process: ArtifactRef,
    #[schema(value_type = String)]
    pub requirements: ArtifactRef,
    #[schema(value_type = String)]
    pub decision_model: ArtifactRef,
    #[schema(value_type = String)]
    pub summary: ArtifactRef,
}

impl GeneratedFiles {
    pub fn get(&self, kind: ArtifactKind) -> &ArtifactRef {
        match kind {
            ArtifactKind::Process => &self.process,
            ArtifactKind::Requirements => &self.requirements,
            ArtifactKind::DecisionModel => &self.decision_model,
            ArtifactKind::Summary => &self.summary,
        }
    }

    pub fn set(&mut self, kind: ArtifactKind, reference: ArtifactRef) {
        let slot = match kind {
            ArtifactKind::Process => &mut self.process,
            ArtifactKind::Requirements => &mut self.requirements,
            ArtifactKind::DecisionModel => &mut self.decision_model,
            ArtifactKind::Summary => &mut self.summary,
        };
        *slot = reference;
    }
}

/// Everything produced by processing one text upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub original_file_name: String,
    pub saved_file_name: String,
    pub payload_kind: PayloadKind,
    pub generated_files: GeneratedFiles,
    /// Summary text: the generated summary or its placeholder
    pub summary: String,
    pub processed_data: ContentStats,
    /// Error message per artifact that could not be produced
    pub failures: BTreeMap<ArtifactKind, String>,
}

impl UploadOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_stats_counts() {
        let stats = ContentStats::from_content("one two\nthree");
        assert_eq!(stats.content_length, 13);
        assert_eq!(stats.line_count, 2);
        assert_eq!(stats.word_count, 3);
    }

    #[test]
    fn test_content_stats_empty_is_one_line() {
        let stats = ContentStats::from_content("");
        assert_eq!(stats.content_length, 0);
        assert_eq!(stats.line_count, 1);
        assert_eq!(stats.word_count, 0);
    }

    #[test]
    fn test_content_stats_counts_chars_not_bytes() {
        let stats = ContentStats::from_content("héllo wörld");
        assert_eq!(stats.content_length, 11);
        assert_eq!(stats.word_count, 2);
    }

    #[test]
    fn test_artifact_ref_serializes_as_string() {
        let mut files = GeneratedFiles::default();
        files.set(ArtifactKind::Process, ArtifactRef::Stored("a_process.bpmn".into()));

        let json = serde_json::to_value(&files).unwrap();
        assert_eq!(json["process"], "a_process.bpmn");
        assert_eq!(json["decisionModel"], NOT_GENERATED);
        assert!(files.get(ArtifactKind::Process).is_stored());
        assert!(!files.get(ArtifactKind::Summary).is_stored());
    }
}
