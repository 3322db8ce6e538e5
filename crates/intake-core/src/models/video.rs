use chrono::{DateTime, Utc};

use super::artifact::StoredArtifact;

/// A video that has been persisted and is awaiting its summary.
#[derive(Debug, Clone)]
pub struct VideoUpload {
    /// Name the client gave the file
    pub original_name: String,
    pub stored: StoredArtifact,
    pub uploaded_at: DateTime<Utc>,
}

impl VideoUpload {
    pub fn new(original_name: impl Into<String>, stored: StoredArtifact) -> Self {
        Self {
            original_name: original_name.into(),
            stored,
            uploaded_at: Utc::now(),
        }
    }

    /// Size in megabytes with two decimals, as shown in prompts.
    pub fn size_mb(&self) -> String {
        format!("{:.2}", self.stored.size_bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Result of processing a video upload.
#[derive(Debug, Clone)]
pub struct VideoOutcome {
    pub video: VideoUpload,
    /// Generated summary, or a failure notice when generation failed
    pub summary: String,
    /// Stored summary file name; `None` when no summary was generated
    pub summary_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mb_formats_two_decimals() {
        let video = VideoUpload::new(
            "clip.mp4",
            StoredArtifact {
                logical_name: "video-1-abcdefgh.mp4".into(),
                storage_key: "videos/video-1-abcdefgh.mp4".into(),
                size_bytes: 5 * 1024 * 1024 + 512 * 1024,
            },
        );
        assert_eq!(video.size_mb(), "5.50");
    }
}
