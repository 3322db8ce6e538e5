//! Shared name generation for stored files.
//!
//! Unique names have the form `{stem}-{unix_ms}-{token}{.ext}` where `token` is
//! eight random lowercase alphanumerics. Generated artifacts derive their names
//! from the stored source name plus a fixed per-kind suffix.

use intake_core::models::ArtifactKind;
use rand::distr::Alphanumeric;
use rand::Rng;
use std::path::Path;

use crate::traits::{StorageError, StorageResult};

const TOKEN_LEN: usize = 8;
const FALLBACK_STEM: &str = "upload";
/// Longest stem kept from a client name, in bytes.
const MAX_STEM_BYTES: usize = 100;
/// Longest extension kept from a client name, in bytes.
const MAX_EXTENSION_BYTES: usize = 16;
/// Filesystem limit on a single path component.
pub const MAX_FILE_NAME_BYTES: usize = 255;

fn random_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// Longest prefix of `s` that fits in `max_bytes` without splitting a char.
fn truncate_bytes(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Split a name into (stem, extension), dropping any directory part and control characters.
fn split_name(original: &str) -> (String, Option<String>) {
    let normalized: String = original
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == '\\' { '/' } else { c })
        .collect();
    let path = Path::new(&normalized);

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.trim())
        .map(|s| s.replace("..", "_"))
        .filter(|s| !s.is_empty() && s != "_")
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    (stem, ext)
}

fn with_timestamp(stem: &str, ext: Option<&str>) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    match ext {
        Some(ext) => format!("{}-{}-{}.{}", stem, millis, random_token(), ext),
        None => format!("{}-{}-{}", stem, millis, random_token()),
    }
}

/// Stem and extension of a client-supplied name, capped so every derived name fits on disk.
fn client_parts(original: &str) -> (String, Option<String>) {
    let (stem, ext) = split_name(original);
    let stem = truncate_bytes(&stem, MAX_STEM_BYTES).trim_end().to_string();
    let ext = ext.map(|e| truncate_bytes(&e, MAX_EXTENSION_BYTES).to_string());
    (stem, ext)
}

/// Collision-resistant name derived from an original file name.
pub fn unique_name(original: &str) -> String {
    let (stem, ext) = client_parts(original);
    with_timestamp(&stem, ext.as_deref())
}

/// Name for an uploaded video, keeping only the original extension.
pub fn video_file_name(original: &str) -> String {
    let (_, ext) = client_parts(original);
    with_timestamp("video", ext.map(|e| e.to_lowercase()).as_deref())
}

/// File name suffix (with extension) for each generated artifact kind.
pub fn artifact_suffix(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Process => "_process.bpmn",
        ArtifactKind::Requirements => "_requirements.md",
        ArtifactKind::DecisionModel => "_decision.dmn",
        ArtifactKind::Summary => "_summary.txt",
    }
}

/// Name of the artifact of `kind` generated from the stored source `source_name`.
pub fn artifact_file_name(source_name: &str, kind: ArtifactKind) -> String {
    let (stem, _) = split_name(source_name);
    format!("{}{}", stem, artifact_suffix(kind))
}

/// Name of the summary stored next to a video.
pub fn video_summary_file_name(video_name: &str) -> String {
    artifact_file_name(video_name, ArtifactKind::Summary)
}

/// Reject names that could escape their category directory.
pub fn validate_file_name(file_name: &str) -> StorageResult<()> {
    if file_name.is_empty()
        || file_name.len() > MAX_FILE_NAME_BYTES
        || file_name.contains("..")
        || file_name.contains('/')
        || file_name.contains('\\')
        || file_name.contains('\0')
    {
        return Err(StorageError::InvalidKey(format!(
            "Invalid file name: {}",
            file_name
        )));
    }
    Ok(())
}
