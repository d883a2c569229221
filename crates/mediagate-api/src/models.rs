//! Response models for the HTTP surface.

use mediagate_storage::StoredObject;
use serde::Serialize;
use utoipa::ToSchema;

/// A stored file as presented to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FileResponse {
    /// Opaque unique id, generated at upload time.
    pub id: String,
    /// Original filename after sanitization.
    pub filename: String,
    /// Retrieval URL appropriate to the active backend.
    pub url: String,
}

impl From<StoredObject> for FileResponse {
    fn from(object: StoredObject) -> Self {
        FileResponse {
            id: object.id,
            filename: object.filename,
            url: object.url,
        }
    }
}
