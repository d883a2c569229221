use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use mediagate_core::{sanitize_filename, StorageBackend};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "./data/media"),
    ///   created if absent and resolved to an absolute path
    /// * `base_url` - Base URL for building retrieval URLs (e.g., "http://localhost:4000")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        let base_path = fs::canonicalize(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to resolve storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a storage key to a filesystem path with security validation.
    ///
    /// Keys produced by `keys::encode` never contain separators, but the key
    /// is validated anyway so a corrupted or hand-built key cannot escape the
    /// storage root.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.contains("..") || key.contains('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(key))
    }

    /// Retrieval URL for a key: `{base_url}/files/{key}`.
    fn generate_url(&self, key: &str) -> String {
        format!("{}/files/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Linear scan of the storage root for the unique key starting with
    /// `{id}__`. Keys are not indexed by id alone, so enumeration is the
    /// only lookup. First match wins.
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<(String, PathBuf)>> {
        if !fs::try_exists(&self.base_path).await.unwrap_or(false) {
            return Ok(None);
        }

        let prefix = keys::id_prefix(id);
        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with(&prefix) && Self::is_file(&entry.path()).await {
                return Ok(Some((name.to_string(), entry.path())));
            }
        }

        Ok(None)
    }

    async fn is_file(path: &Path) -> bool {
        fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, filename: &str, data: Vec<u8>) -> StorageResult<StoredObject> {
        let filename =
            sanitize_filename(filename).map_err(|e| StorageError::InvalidKey(e.to_string()))?;
        let id = Uuid::new_v4();
        let key = keys::encode(id, &filename);
        let path = self.key_to_path(&key)?;
        let size = data.len();

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage put successful"
        );

        Ok(StoredObject {
            id: id.to_string(),
            filename,
            key,
            url,
        })
    }

    async fn list(&self) -> StorageResult<Vec<StoredObject>> {
        if !fs::try_exists(&self.base_path).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let mut objects = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?
        {
            if !Self::is_file(&entry.path()).await {
                continue;
            }
            let name = entry.file_name();
            let Some(key) = name.to_str() else { continue };
            // Skip objects this service did not write.
            let Some((id, filename)) = keys::decode(key) else {
                continue;
            };
            objects.push(StoredObject {
                id,
                filename,
                key: key.to_string(),
                url: self.generate_url(key),
            });
        }

        Ok(objects)
    }

    async fn get(&self, id: &str) -> StorageResult<(Vec<u8>, String)> {
        let start = std::time::Instant::now();

        let Some((key, path)) = self.find_by_id(id).await? else {
            return Err(StorageError::NotFound(id.to_string()));
        };

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let filename = keys::decode(&key)
            .map(|(_, filename)| filename)
            .unwrap_or_else(|| key.clone());

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage get successful"
        );

        Ok((data, filename))
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();

        let Some((key, path)) = self.find_by_id(id).await? else {
            return Err(StorageError::NotFound(id.to_string()));
        };

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn test_storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path(), "http://localhost:4000".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let data = b"test data".to_vec();
        let object = storage.put("test.txt", data.clone()).await.unwrap();

        assert_eq!(object.filename, "test.txt");
        assert_eq!(object.key, format!("{}__test.txt", object.id));
        assert_eq!(
            object.url,
            format!("http://localhost:4000/files/{}", object.key)
        );

        let (downloaded, filename) = storage.get(&object.id).await.unwrap();
        assert_eq!(downloaded, data);
        assert_eq!(filename, "test.txt");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let result = storage.get("00000000-0000-0000-0000-000000000000").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_decodes_keys() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let a = storage.put("a.txt", b"a".to_vec()).await.unwrap();
        let b = storage.put("b.txt", b"b".to_vec()).await.unwrap();

        let mut objects = storage.list().await.unwrap();
        objects.sort_by(|x, y| x.filename.cmp(&y.filename));

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].id, a.id);
        assert_eq!(objects[0].filename, "a.txt");
        assert_eq!(objects[1].id, b.id);
        assert_eq!(objects[1].filename, "b.txt");
    }

    #[tokio::test]
    async fn test_list_skips_foreign_files_and_directories() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        storage.put("kept.txt", b"x".to_vec()).await.unwrap();
        std::fs::write(dir.path().join("no-separator.txt"), b"y").unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();
        std::fs::write(dir.path().join("subdir").join("nested__a.txt"), b"z").unwrap();

        let objects = storage.list().await.unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].filename, "kept.txt");
    }

    #[tokio::test]
    async fn test_list_empty_directory() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        assert!(storage.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_delete_again() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let object = storage.put("gone.txt", b"x".to_vec()).await.unwrap();

        storage.delete(&object.id).await.unwrap();
        assert!(matches!(
            storage.get(&object.id).await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.delete(&object.id).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_traversal_filename_stays_inside_root() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        // Directory components are stripped by sanitization, so the write
        // lands inside the storage root under the final component.
        let object = storage.put("nested/dir/evil.txt", b"x".to_vec()).await.unwrap();
        assert_eq!(object.filename, "evil.txt");
        assert!(dir.path().join(&object.key).exists());

        // A parent-directory prefix is stripped the same way.
        let object = storage.put("../escape.txt", b"x".to_vec()).await.unwrap();
        assert_eq!(object.filename, "escape.txt");
        assert!(dir.path().join(&object.key).exists());
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());

        // A bare traversal component is rejected before anything touches the disk.
        let result = storage.put("..", b"x".to_vec()).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_distinct_ids_for_same_filename() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let first = storage.put("same.txt", b"1".to_vec()).await.unwrap();
        let second = storage.put("same.txt", b"2".to_vec()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(storage.get(&first.id).await.unwrap().0, b"1".to_vec());
        assert_eq!(storage.get(&second.id).await.unwrap().0, b"2".to_vec());
    }
}
