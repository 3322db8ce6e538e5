use async_trait::async_trait;

use super::error::GenerationError;

/// A single-turn text completion backend.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send one prompt and return the generated text.
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}
