//! Intake HTTP API
//!
//! axum routes over the upload orchestrator. The binary in `main.rs` only
//! loads configuration and calls [`setup::initialize_app`]; tests build the
//! router through [`setup::build_state`] and [`setup::routes::setup_routes`].

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;
pub mod validation;
