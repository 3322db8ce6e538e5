//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use intake_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Room for multipart boundaries and part headers on top of the video itself.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Upper bound on requests handled at once.
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let video_body_bytes = config
        .max_video_size_bytes
        .checked_add(MULTIPART_OVERHEAD_BYTES)
        .ok_or_else(|| anyhow::anyhow!("MAX_VIDEO_SIZE_MB is too large"))?;
    let text_limit = DefaultBodyLimit::max(config.max_json_body_bytes);
    let video_limit = DefaultBodyLimit::max(video_body_bytes);
    let request_limit = config.max_json_body_bytes.max(video_body_bytes);

    tracing::info!(
        max_json_body_bytes = config.max_json_body_bytes,
        max_video_size_bytes = config.max_video_size_bytes,
        video_extensions = %config.video_allowed_extensions.join(","),
        "Upload limits configured"
    );

    let upload_routes = Router::new()
        .route(
            "/text",
            post(handlers::text_upload::upload_text).layer(text_limit),
        )
        .route(
            "/text-binary",
            post(handlers::text_upload::upload_text_binary).layer(text_limit),
        )
        .route(
            "/video",
            post(handlers::video_upload::upload_video).layer(video_limit),
        )
        .route(
            "/download/{category}/{file_name}",
            get(handlers::download::download_file),
        );

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/upload", upload_routes)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(
            ServiceBuilder::new()
                .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
                .layer(RequestBodyLimitLayer::new(request_limit)),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
