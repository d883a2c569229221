//! Mediagate Storage Library
//!
//! This crate provides the storage abstraction and implementations for the
//! media gateway: a `Storage` trait plus local filesystem and Google Cloud
//! Storage backends.
//!
//! # Physical key format
//!
//! Every stored object lives under the key `{id}__{filename}`, where `id` is
//! a UUID generated at upload time and `filename` is the sanitized original
//! name. Both pieces are recovered from the key alone by splitting at the
//! FIRST `__` occurrence; no index or database is kept. Key encoding and
//! decoding are centralized in the `keys` module so all backends stay
//! consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-gcs")]
pub mod gcs;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-gcs")]
pub use gcs::GcsStorage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use mediagate_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
