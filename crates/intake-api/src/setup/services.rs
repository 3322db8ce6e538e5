//! Service initialization and application state setup

use crate::state::AppState;
use anyhow::{Context, Result};
use intake_core::Config;
use intake_services::{ArtifactGenerator, GeminiClient, LanguageModel, UploadOrchestrator};
use intake_storage::ArtifactStore;
use std::sync::Arc;

/// Build the Gemini client and the application state around it.
pub fn initialize_services(config: &Config, store: Arc<dyn ArtifactStore>) -> Result<Arc<AppState>> {
    let client = GeminiClient::new(config.generation.clone())
        .context("Failed to create generative-language client")?;

    tracing::info!(
        base_url = %config.generation.base_url,
        timeout_secs = config.generation.timeout_secs,
        "Generation client initialized"
    );

    Ok(build_state(config.clone(), Arc::new(client), store))
}

/// Assemble the application state from an already constructed model and store.
pub fn build_state(
    config: Config,
    model: Arc<dyn LanguageModel>,
    store: Arc<dyn ArtifactStore>,
) -> Arc<AppState> {
    let generator = ArtifactGenerator::new(model);
    let orchestrator = UploadOrchestrator::new(generator, store.clone(), config.generation_mode);

    Arc::new(AppState {
        config,
        orchestrator,
        store,
    })
}
