//! Intake Storage Library
//!
//! Persistence for uploaded sources and generated artifacts. The
//! [`ArtifactStore`] trait describes the operations the orchestrator needs;
//! [`LocalArtifactStore`] implements them on the local filesystem.
//!
//! # Layout
//!
//! Every file lives under one [`StorageCategory`] directory:
//!
//! - `texts/` - uploaded source text
//! - `videos/` - uploaded videos and their summaries
//! - `generated/bpmn/`, `generated/prd/`, `generated/drd/`, `generated/summaries/`
//!
//! A storage key is `{category_dir}/{file_name}`. File names must not contain
//! `..` or path separators. Name generation is centralized in the `keys` module.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::{artifact_file_name, unique_name, video_file_name, video_summary_file_name};
pub use local::LocalArtifactStore;
pub use traits::{ArtifactStore, StorageCategory, StorageError, StorageResult};
