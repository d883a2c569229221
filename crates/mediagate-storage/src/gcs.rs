use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use mediagate_core::{sanitize_filename, StorageBackend};
use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStore, ObjectStoreExt, PutPayload, Result as ObjectResult};
use uuid::Uuid;

/// Google Cloud Storage implementation
///
/// Credentials are picked up from the ambient environment
/// (GOOGLE_APPLICATION_CREDENTIALS / GOOGLE_SERVICE_ACCOUNT and friends).
#[derive(Clone)]
pub struct GcsStorage {
    store: GoogleCloudStorage,
    bucket: String,
}

/// Bucket-public URL for a GCS object.
fn public_url(bucket: &str, key: &str) -> String {
    format!("https://storage.googleapis.com/{}/{}", bucket, key)
}

impl GcsStorage {
    /// Create a new GcsStorage instance for the given bucket.
    pub async fn new(bucket: String) -> StorageResult<Self> {
        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket.clone())
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(GcsStorage { store, bucket })
    }

    fn generate_url(&self, key: &str) -> String {
        public_url(&self.bucket, key)
    }

    /// Enumerate top-level object keys. Keys under a prefix (containing `/`)
    /// are ignored; the gateway only ever writes at the bucket root.
    async fn list_keys(&self) -> StorageResult<Vec<String>> {
        let mut stream = self.store.list(None);
        let mut out = Vec::new();

        while let Some(meta) = stream.next().await {
            let meta = meta.map_err(|e| StorageError::BackendError(e.to_string()))?;
            let key: &str = meta.location.as_ref();
            if !key.contains('/') {
                out.push(key.to_string());
            }
        }

        Ok(out)
    }

    /// Linear scan for the unique key starting with `{id}__`, mirroring the
    /// local backend's directory scan. First match wins.
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<String>> {
        let prefix = keys::id_prefix(id);
        Ok(self
            .list_keys()
            .await?
            .into_iter()
            .find(|key| key.starts_with(&prefix)))
    }
}

#[async_trait]
impl Storage for GcsStorage {
    async fn put(&self, filename: &str, data: Vec<u8>) -> StorageResult<StoredObject> {
        let filename =
            sanitize_filename(filename).map_err(|e| StorageError::InvalidKey(e.to_string()))?;
        let id = Uuid::new_v4();
        let key = keys::encode(id, &filename);
        let size = data.len() as u64;
        let bytes = Bytes::from(data);
        let location = Path::from(key.clone());

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.put(&location, PutPayload::from(bytes)).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "GCS put failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS put successful"
        );

        Ok(StoredObject {
            id: id.to_string(),
            filename,
            key,
            url,
        })
    }

    async fn list(&self) -> StorageResult<Vec<StoredObject>> {
        let objects = self
            .list_keys()
            .await?
            .into_iter()
            .filter_map(|key| {
                // Skip objects this service did not write.
                let (id, filename) = keys::decode(&key)?;
                let url = self.generate_url(&key);
                Some(StoredObject {
                    id,
                    filename,
                    key,
                    url,
                })
            })
            .collect();

        Ok(objects)
    }

    async fn get(&self, id: &str) -> StorageResult<(Vec<u8>, String)> {
        let start = std::time::Instant::now();

        let Some(key) = self.find_by_id(id).await? else {
            return Err(StorageError::NotFound(id.to_string()));
        };

        let location = Path::from(key.clone());
        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(id.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "GCS get failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        let filename = keys::decode(&key)
            .map(|(_, filename)| filename)
            .unwrap_or_else(|| key.clone());

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = bytes.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS get successful"
        );

        Ok((bytes.to_vec(), filename))
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();

        let Some(key) = self.find_by_id(id).await? else {
            return Err(StorageError::NotFound(id.to_string()));
        };

        let location = Path::from(key.clone());
        let result: ObjectResult<_> = self.store.delete(&location).await;

        result.map_err(|e| match e {
            // A reader racing this delete may have lost; treat as absent.
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(id.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "GCS delete failed"
                );
                StorageError::DeleteFailed(other.to_string())
            }
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS delete successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }
}
