//! Storage setup and initialization

use anyhow::{Context, Result};
use intake_core::Config;
use intake_storage::{ArtifactStore, LocalArtifactStore};
use std::sync::Arc;

/// Open the local artifact store and create its directory layout.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn ArtifactStore>> {
    tracing::info!(upload_dir = %config.upload_dir.display(), "Initializing artifact store...");

    let store = LocalArtifactStore::new(config.upload_dir.clone())
        .await
        .context("Failed to open upload directory")?;
    store
        .ensure_layout()
        .await
        .context("Failed to create upload directory layout")?;

    tracing::info!(
        base_path = %store.base_path().display(),
        "Artifact store initialized successfully"
    );

    Ok(Arc::new(store))
}
