use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::error::GenerationError;
use super::model::LanguageModel;

/// A language model that answers from canned responses and records every prompt.
///
/// Rules are matched by substring against the prompt, first match wins; prompts
/// matching no rule get the default response.
#[derive(Debug, Default)]
pub struct MockLanguageModel {
    default_response: String,
    responses: Vec<(String, String)>,
    failures: Vec<String>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockLanguageModel {
    /// Create a mock that answers every prompt with `response`.
    pub fn responding(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            ..Self::default()
        }
    }

    /// Answer prompts containing `needle` with `response`.
    pub fn respond_to(mut self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses.push((needle.into(), response.into()));
        self
    }

    /// Fail prompts containing `needle` with an API error.
    pub fn failing_when_prompt_contains(mut self, needle: impl Into<String>) -> Self {
        self.failures.push(needle.into());
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if self.failures.iter().any(|needle| prompt.contains(needle.as_str())) {
            return Err(GenerationError::Api {
                status: 503,
                body: "simulated failure".to_string(),
            });
        }

        let response = self
            .responses
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| self.default_response.clone());

        Ok(response)
    }
}

/// A language model that always fails, simulating an unreachable API.
#[derive(Debug, Default)]
pub struct FailingLanguageModel {
    calls: AtomicUsize,
}

impl FailingLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for FailingLanguageModel {
    async fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerationError::Http("connection refused".to_string()))
    }
}
