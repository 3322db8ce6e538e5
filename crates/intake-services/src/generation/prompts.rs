//! Prompt text and failure placeholders for each artifact kind.

use intake_core::models::{ArtifactKind, VideoUpload};

use super::normalize::XML_PROLOGUE;

/// Fixed summary placeholder, used whether the content was unusable or the call failed.
pub const SUMMARY_FAILED: &str = "Summary generation failed. Please try again later.";

/// Why a placeholder is being substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// Content did not survive sanitization; no call was made
    NoContent,
    /// The language model call failed
    CallFailed,
}

/// Well-formed fallback text for an artifact that could not be generated.
pub fn placeholder(kind: ArtifactKind, reason: Degradation) -> String {
    match (kind, reason) {
        (ArtifactKind::Summary, _) => SUMMARY_FAILED.to_string(),
        (ArtifactKind::Process, Degradation::NoContent) => {
            format!("{XML_PROLOGUE}<definitions>No valid content</definitions>")
        }
        (ArtifactKind::Process, Degradation::CallFailed) => {
            format!("{XML_PROLOGUE}<definitions>Failed to generate BPMN</definitions>")
        }
        (ArtifactKind::Requirements, Degradation::NoContent) => {
            "# PRD generation failed. No valid content provided.".to_string()
        }
        (ArtifactKind::Requirements, Degradation::CallFailed) => {
            "# PRD generation failed. Try again.".to_string()
        }
        (ArtifactKind::DecisionModel, Degradation::NoContent) => {
            format!("{XML_PROLOGUE}<definitions>Invalid content</definitions>")
        }
        (ArtifactKind::DecisionModel, Degradation::CallFailed) => {
            format!("{XML_PROLOGUE}<definitions>DRD generation failed</definitions>")
        }
    }
}

/// Build the instruction sent to the model for `kind`.
pub fn prompt_for(kind: ArtifactKind, content: &str) -> String {
    match kind {
        ArtifactKind::Summary => format!(
            "You are receiving plain text content. Summarize it with:\n\
             1. A brief executive summary (2–3 sentences)\n\
             2. Key points and main themes\n\
             3. Insights or recommendations (if any)\n\
             \n\
             Text Content:\n\
             {content}"
        ),
        ArtifactKind::Process => format!(
            "Based on the following process description, generate a valid BPMN 2.0 XML file \
             that models the business process.\n\
             \n\
             Text:\n\
             {content}\n\
             \n\
             Requirements:\n\
             - Include start/end events, tasks, decisions, lanes (if needed), and proper flows.\n\
             - Output ONLY BPMN XML.\n\
             - No markdown or code blocks.\n\
             \n\
             Begin with: {XML_PROLOGUE}"
        ),
        ArtifactKind::Requirements => format!(
            "Based on the following description, generate a full Product Requirements Document \
             (PRD) in Markdown format.\n\
             \n\
             Text:\n\
             {content}\n\
             \n\
             Include the following sections:\n\
             - Executive Summary\n\
             - Product Overview\n\
             - Objectives and Goals\n\
             - User Stories\n\
             - Functional Requirements\n\
             - Non-Functional Requirements\n\
             - Technical Requirements\n\
             - UI Requirements\n\
             - Timeline and Milestones\n\
             - Risks and Mitigation"
        ),
        ArtifactKind::DecisionModel => format!(
            "Based on the following business rules and conditions, generate a valid DMN XML file \
             for a Decision Requirements Diagram (DRD).\n\
             \n\
             Text:\n\
             {content}\n\
             \n\
             Only return valid DMN XML, no code blocks or extra formatting.\n\
             Begin with: {XML_PROLOGUE}"
        ),
    }
}

/// Metadata description of a video, summarized in place of its content.
pub fn video_description(video: &VideoUpload) -> String {
    format!(
        "Please provide a brief summary for a video file with the following details:\n\
         - File Name: {}\n\
         - File Size: {} MB\n\
         - Upload Date: {}",
        video.original_name,
        video.size_mb(),
        video.uploaded_at.format("%Y-%m-%d")
    )
}
