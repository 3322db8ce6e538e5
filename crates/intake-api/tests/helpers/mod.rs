//! Shared setup for API integration tests: a router over a temporary upload
//! directory and a scripted language model.

#![allow(dead_code)]

use axum_test::TestServer;
use intake_api::setup::{build_state, routes};
use intake_core::Config;
use intake_services::{LanguageModel, MockLanguageModel};
use intake_storage::{ArtifactStore, LocalArtifactStore};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Needles matching the prompt of each artifact kind.
pub const PROCESS_PROMPT: &str = "BPMN 2.0";
pub const REQUIREMENTS_PROMPT: &str = "Product Requirements Document";
pub const DECISION_PROMPT: &str = "DMN XML";
pub const SUMMARY_PROMPT: &str = "Summarize it with";
pub const VIDEO_PROMPT: &str = "video file with the following details";

pub struct TestApp {
    pub server: TestServer,
    pub model: Arc<MockLanguageModel>,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn path(&self, relative: &str) -> PathBuf {
        self.upload_dir.path().join(relative)
    }

    /// File names stored under `relative`, sorted.
    pub fn files_in(&self, relative: &str) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.path(relative))
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).expect("read stored file")
    }
}

pub fn test_config(upload_dir: &Path, overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("GEMINI_API_KEY".into(), "test-key".into());
    vars.insert("UPLOAD_DIR".into(), upload_dir.display().to_string());
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config")
}

pub async fn setup_test_app(model: MockLanguageModel) -> TestApp {
    setup_test_app_with(model, &[]).await
}

pub async fn setup_test_app_with(model: MockLanguageModel, overrides: &[(&str, &str)]) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("temp dir");
    let config = test_config(upload_dir.path(), overrides);

    let store = LocalArtifactStore::new(upload_dir.path())
        .await
        .expect("open store");
    store.ensure_layout().await.expect("create layout");
    let store: Arc<dyn ArtifactStore> = Arc::new(store);

    let model = Arc::new(model);
    let language_model: Arc<dyn LanguageModel> = model.clone();
    let state = build_state(config.clone(), language_model, store);

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        model,
        upload_dir,
    }
}
