//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mediagate API",
        version = "0.1.0",
        description = "Minimal media-file storage gateway: upload, list, retrieve, and delete opaque binary files backed by a local directory or a GCS bucket."
    ),
    paths(
        handlers::upload::upload_file,
        handlers::list::list_files,
        handlers::download::download_file,
        handlers::delete::delete_file,
    ),
    components(schemas(models::FileResponse, error::ErrorResponse)),
    tags(
        (name = "files", description = "File storage operations")
    )
)]
pub struct ApiDoc;
