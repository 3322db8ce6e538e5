//! Intake Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! content sanitizer shared by all intake components.

pub mod config;
pub mod error;
pub mod models;
pub mod sanitize;

// Re-export commonly used types
pub use config::{Config, GenerationConfig, GenerationMode};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use sanitize::{sanitize, MAX_CONTENT_CHARS, TRUNCATION_MARKER};
