//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use mediagate_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A stored file, derived entirely from its physical key at read time.
/// Nothing about it is persisted anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Opaque unique id generated at upload time.
    pub id: String,
    /// Sanitized original filename.
    pub filename: String,
    /// Physical key under which the bytes are stored: `{id}__{filename}`.
    pub key: String,
    /// Backend-appropriate retrieval URL.
    pub url: String,
}

/// Storage abstraction trait
///
/// All storage backends (local filesystem, GCS) must implement this trait.
/// The concrete backend is selected once at startup from configuration and
/// injected into the HTTP facade, so request handling never branches on the
/// active profile.
///
/// **Key format:** `{id}__{filename}`, decoded by splitting at the first
/// `__` occurrence. See the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store the given bytes under a freshly generated id.
    ///
    /// The filename is sanitized before the key is built. Writing to an
    /// already occupied key overwrites it, which cannot happen in practice
    /// because ids are never reused.
    async fn put(&self, filename: &str, data: Vec<u8>) -> StorageResult<StoredObject>;

    /// Enumerate all objects at the top level of the storage location.
    ///
    /// Keys that do not decode to `(id, filename)` are skipped. Returns an
    /// empty vec, never an error, when the location is empty or absent.
    /// Ordering is whatever the backend enumeration yields.
    async fn list(&self) -> StorageResult<Vec<StoredObject>>;

    /// Fetch the bytes and original filename of the object whose key starts
    /// with `{id}__`. Requires a linear scan since keys are not indexed by
    /// id alone; the first match wins if the prefix is somehow duplicated.
    async fn get(&self, id: &str) -> StorageResult<(Vec<u8>, String)>;

    /// Remove the object with the given id. Returns `NotFound` when no such
    /// object exists; a second delete of the same id therefore also reports
    /// `NotFound`. Not atomic with respect to concurrent readers.
    async fn delete(&self, id: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
