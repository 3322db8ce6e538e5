//! Artifact generation through a language model.

mod error;
mod gemini;
mod generator;
pub mod mock;
mod model;
pub mod normalize;
pub mod prompts;

pub use error::GenerationError;
pub use gemini::GeminiClient;
pub use generator::ArtifactGenerator;
pub use mock::{FailingLanguageModel, MockLanguageModel};
pub use model::LanguageModel;
