//! Video upload validation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VideoValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {})", allowed.join(", "))]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Missing file extension (filename: {0})")]
    MissingExtension(String),

    #[error("Only video files are allowed (content type: {content_type})")]
    InvalidContentType { content_type: String },

    #[error("File is empty")]
    EmptyFile,
}

/// Limits applied to an uploaded video before it is stored.
#[derive(Debug, Clone)]
pub struct VideoLimits<'a> {
    pub max_size_bytes: usize,
    pub allowed_extensions: &'a [String],
}

/// Check a video's size, extension and declared content type.
///
/// Returns the lowercased extension on success.
pub fn validate_video(
    file_name: &str,
    content_type: &str,
    size: usize,
    limits: &VideoLimits<'_>,
) -> Result<String, VideoValidationError> {
    if size == 0 {
        return Err(VideoValidationError::EmptyFile);
    }
    if size > limits.max_size_bytes {
        return Err(VideoValidationError::FileTooLarge {
            size,
            max: limits.max_size_bytes,
        });
    }

    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| VideoValidationError::MissingExtension(file_name.to_string()))?;

    if !limits
        .allowed_extensions
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
    {
        return Err(VideoValidationError::InvalidExtension {
            extension,
            allowed: limits.allowed_extensions.to_vec(),
        });
    }

    let mime = crate::utils::upload::normalize_mime_type(content_type).to_lowercase();
    if !mime.starts_with("video/") {
        return Err(VideoValidationError::InvalidContentType {
            content_type: mime,
        });
    }

    Ok(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        ["mp4", "mov", "webm"].iter().map(|s| s.to_string()).collect()
    }

    fn check(name: &str, content_type: &str, size: usize) -> Result<String, VideoValidationError> {
        let allowed = allowed();
        let limits = VideoLimits {
            max_size_bytes: 1024,
            allowed_extensions: &allowed,
        };
        validate_video(name, content_type, size, &limits)
    }

    #[test]
    fn test_accepts_allowed_video() {
        assert_eq!(check("clip.MP4", "video/mp4", 10).unwrap(), "mp4");
        assert_eq!(
            check("clip.webm", "video/webm; codecs=vp9", 10).unwrap(),
            "webm"
        );
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        assert!(matches!(
            check("clip.mp4", "video/mp4", 0),
            Err(VideoValidationError::EmptyFile)
        ));
        assert!(matches!(
            check("clip.mp4", "video/mp4", 1025),
            Err(VideoValidationError::FileTooLarge { size: 1025, max: 1024 })
        ));
    }

    #[test]
    fn test_rejects_bad_extension() {
        assert!(matches!(
            check("notes.txt", "video/mp4", 10),
            Err(VideoValidationError::InvalidExtension { .. })
        ));
        assert!(matches!(
            check("clip", "video/mp4", 10),
            Err(VideoValidationError::MissingExtension(_))
        ));
    }

    #[test]
    fn test_rejects_non_video_content_type() {
        assert!(matches!(
            check("clip.mp4", "image/png", 10),
            Err(VideoValidationError::InvalidContentType { .. })
        ));
    }
}
