//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use audex_core::Config;
use audex_processing::{ExtractionPipeline, FfmpegTranscoder, PipelineConfig};
use audex_storage::create_storage;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    tracing::info!(backend = %config.storage_backend, "Initializing storage...");
    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage")?;

    let transcoder = Arc::new(FfmpegTranscoder::new(config.ffmpeg_path.clone()));
    let pipeline = ExtractionPipeline::new(storage, transcoder, PipelineConfig::from(&config));
    let state = Arc::new(AppState::new(pipeline, config.storage_backend));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
