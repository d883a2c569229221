//! Mediagate Core Library
//!
//! This crate provides the configuration, error types, and filename validation
//! shared by the storage and API crates.

pub mod config;
pub mod error;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, LogLevel};
pub use storage_types::StorageBackend;
pub use validation::sanitize_filename;
