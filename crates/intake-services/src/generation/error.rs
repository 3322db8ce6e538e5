use thiserror::Error;

/// Errors that can occur while asking the language model for text.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timed out.
    #[error("language model request timed out after {0}s")]
    Timeout(u64),

    /// The API answered with a non-success status.
    #[error("language model API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// The response body did not contain generated text.
    #[error("malformed language model response: {0}")]
    MalformedResponse(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl GenerationError {
    /// Reason safe to show to API clients; the full error stays in the logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            GenerationError::Http(_) => "language model unreachable",
            GenerationError::Timeout(_) => "language model request timed out",
            GenerationError::Api { .. } => "language model returned an error",
            GenerationError::MalformedResponse(_) => "language model returned an unexpected response",
            GenerationError::Configuration(_) => "language model is not configured",
        }
    }
}
