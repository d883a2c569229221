//! Mediagate API Library
//!
//! This crate provides the HTTP handlers and application setup for the
//! media-file storage gateway.

// Module declarations
mod api_doc;
mod handlers;

// Public modules
pub mod error;
pub mod models;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use models::FileResponse;
