//! Storage setup and initialization

use anyhow::Result;
use mediagate_core::Config;
use mediagate_storage::{create_storage, Storage};
use std::sync::Arc;

/// Setup the storage backend selected by the active profile.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config).await?;

    tracing::info!(
        backend = ?storage.backend_type(),
        "Storage abstraction initialized successfully"
    );

    Ok(storage)
}
