//! Intake Services
//!
//! Turns uploads into stored source files and generated artifacts. The
//! [`generation`] module talks to the language model; the
//! [`orchestrator`] drives sanitization, generation and storage for one upload.

pub mod generation;
pub mod orchestrator;

pub use generation::{
    ArtifactGenerator, FailingLanguageModel, GeminiClient, GenerationError, LanguageModel,
    MockLanguageModel,
};
pub use orchestrator::UploadOrchestrator;
