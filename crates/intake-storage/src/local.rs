use crate::keys::{unique_name, validate_file_name, video_file_name};
use crate::traits::{ArtifactStore, StorageCategory, StorageError, StorageResult};
use async_trait::async_trait;
use intake_core::models::StoredArtifact;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem artifact store
#[derive(Clone, Debug)]
pub struct LocalArtifactStore {
    base_path: PathBuf,
}

impl LocalArtifactStore {
    /// Create a new store rooted at `base_path` (e.g. "uploads"), creating the directory.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalArtifactStore { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert a category and file name to a filesystem path
    ///
    /// Rejects names that could resolve outside the category directory.
    fn resolve(&self, category: StorageCategory, file_name: &str) -> StorageResult<(String, PathBuf)> {
        validate_file_name(file_name)?;
        let key = category.key_for(file_name);
        let path = self.base_path.join(&key);
        Ok((key, path))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn write_new(
        &self,
        category: StorageCategory,
        file_name: &str,
        data: &[u8],
    ) -> StorageResult<StoredArtifact> {
        let (key, path) = self.resolve(category, file_name)?;
        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(StoredArtifact {
            logical_name: file_name.to_string(),
            storage_key: key,
            size_bytes: data.len() as u64,
        })
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn store_source_text(
        &self,
        original_name: &str,
        content: &str,
    ) -> StorageResult<StoredArtifact> {
        let name = unique_name(original_name);
        self.write_new(StorageCategory::SourceText, &name, content.as_bytes())
            .await
    }

    async fn store_generated_artifact(
        &self,
        file_name: &str,
        content: &str,
        category: StorageCategory,
    ) -> StorageResult<StoredArtifact> {
        self.write_new(category, file_name, content.as_bytes()).await
    }

    async fn store_video(
        &self,
        original_name: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredArtifact> {
        let name = video_file_name(original_name);
        self.write_new(StorageCategory::Video, &name, &data).await
    }

    async fn read(&self, category: StorageCategory, file_name: &str) -> StorageResult<Vec<u8>> {
        let (key, path) = self.resolve(category, file_name)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(key));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage read successful"
        );

        Ok(data)
    }

    async fn exists(&self, category: StorageCategory, file_name: &str) -> StorageResult<bool> {
        let (_, path) = self.resolve(category, file_name)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn ensure_layout(&self) -> StorageResult<()> {
        for category in StorageCategory::ALL {
            let dir = self.base_path.join(category.dir());
            fs::create_dir_all(&dir).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }
        tracing::debug!(base_path = %self.base_path.display(), "Storage layout ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_source_text_round_trip() {
        let dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path()).await.unwrap();

        let content = "Process: user submits form.\nÜnïcödé survives. ✓";
        let stored = store.store_source_text("notes.txt", content).await.unwrap();

        assert!(stored.logical_name.starts_with("notes-"));
        assert_eq!(stored.storage_key, format!("texts/{}", stored.logical_name));
        assert_eq!(stored.size_bytes, content.len() as u64);

        let read = store
            .read(StorageCategory::SourceText, &stored.logical_name)
            .await
            .unwrap();
        assert_eq!(read, content.as_bytes());
    }

    #[tokio::test]
    async fn test_same_original_name_never_collides() {
        let dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path()).await.unwrap();

        let a = store.store_source_text("same.txt", "a").await.unwrap();
        let b = store.store_source_text("same.txt", "b").await.unwrap();
        assert_ne!(a.logical_name, b.logical_name);
    }

    #[tokio::test]
    async fn test_generated_artifact_uses_exact_name() {
        let dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path()).await.unwrap();

        let stored = store
            .store_generated_artifact("n-1-abcdefgh_process.bpmn", "<xml/>", StorageCategory::Process)
            .await
            .unwrap();

        assert_eq!(stored.logical_name, "n-1-abcdefgh_process.bpmn");
        assert!(dir
            .path()
            .join("generated/bpmn/n-1-abcdefgh_process.bpmn")
            .exists());
        assert!(store
            .exists(StorageCategory::Process, "n-1-abcdefgh_process.bpmn")
            .await
            .unwrap());
        assert!(!store
            .exists(StorageCategory::DecisionModel, "n-1-abcdefgh_process.bpmn")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_existing_file_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path()).await.unwrap();

        store
            .store_generated_artifact("x_summary.txt", "first", StorageCategory::Summary)
            .await
            .unwrap();
        let second = store
            .store_generated_artifact("x_summary.txt", "second", StorageCategory::Summary)
            .await;

        assert!(matches!(second, Err(StorageError::UploadFailed(_))));
        let kept = store
            .read(StorageCategory::Summary, "x_summary.txt")
            .await
            .unwrap();
        assert_eq!(kept, b"first");
    }

    #[tokio::test]
    async fn test_store_video() {
        let dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path()).await.unwrap();

        let stored = store
            .store_video("clip.MOV", vec![0u8; 2048])
            .await
            .unwrap();

        assert!(stored.logical_name.starts_with("video-"));
        assert!(stored.logical_name.ends_with(".mov"));
        assert!(stored.storage_key.starts_with("videos/"));
        assert_eq!(stored.size_bytes, 2048);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path()).await.unwrap();

        let result = store.read(StorageCategory::SourceText, "../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = store.exists(StorageCategory::Video, "/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = store
            .store_generated_artifact("../escape.md", "x", StorageCategory::Requirements)
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path()).await.unwrap();

        let result = store.read(StorageCategory::Summary, "missing.txt").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_ensure_layout_creates_directories() {
        let dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path().join("uploads")).await.unwrap();

        store.ensure_layout().await.unwrap();

        for sub in [
            "texts",
            "videos",
            "generated/bpmn",
            "generated/prd",
            "generated/drd",
            "generated/summaries",
        ] {
            assert!(dir.path().join("uploads").join(sub).is_dir(), "{sub} missing");
        }
    }
}
