#[cfg(feature = "storage-gcs")]
use crate::GcsStorage;
#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use mediagate_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration.
///
/// Called exactly once at startup; the result is injected into the HTTP
/// facade so request handling never re-reads the profile.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        #[cfg(feature = "storage-gcs")]
        StorageBackend::Gcs => {
            let bucket = config.gcs_bucket.clone().ok_or_else(|| {
                StorageError::ConfigError("GCS_BUCKET not configured".to_string())
            })?;

            let storage = GcsStorage::new(bucket).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-gcs"))]
        StorageBackend::Gcs => Err(StorageError::ConfigError(
            "GCS storage backend not available (storage-gcs feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let storage = LocalStorage::new(
                config.media_storage_dir.clone(),
                config.public_base_url.clone(),
            )
            .await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
