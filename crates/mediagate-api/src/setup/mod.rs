//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod routes;
pub mod server;
pub mod storage;
pub mod telemetry;

use crate::state::AppState;
use anyhow::{Context, Result};
use mediagate_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!(
        backend = %config.storage_backend,
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    // Setup storage
    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState {
        storage,
        config: config.clone(),
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
