//! Application setup and initialization
//!
//! Everything `main` needs to go from a [`Config`] to a running router.

pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use intake_core::Config;
use std::sync::Arc;

pub use services::build_state;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_tracing(config.is_production())
        .context("Failed to initialize tracing")?;

    tracing::info!(
        environment = %config.environment,
        generation_mode = ?config.generation_mode,
        model = %config.generation.model,
        "Configuration loaded and validated successfully"
    );

    // Setup storage
    let store = storage::setup_storage(&config).await?;

    // Wire generation and orchestration
    let state = services::initialize_services(&config, store)?;

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
