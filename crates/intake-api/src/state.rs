//! Application state shared by every handler.

use intake_core::Config;
use intake_services::UploadOrchestrator;
use intake_storage::ArtifactStore;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub orchestrator: UploadOrchestrator,
    /// Same store the orchestrator writes to; handlers use it for videos and downloads
    pub store: Arc<dyn ArtifactStore>,
}
