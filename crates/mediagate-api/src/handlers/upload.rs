use crate::error::{ErrorResponse, HttpAppError};
use crate::models::FileResponse;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use mediagate_core::{sanitize_filename, AppError};
use std::sync::Arc;

/// Extract file bytes and filename from the multipart form.
/// Only one field named "file" is accepted; multiple file fields are rejected.
async fn extract_multipart_file(mut multipart: Multipart) -> Result<(Vec<u8>, String), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            if file_data.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                ));
            }
            filename = field.file_name().map(|s: &str| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

            file_data = Some(data.to_vec());
        }
    }

    let file_data = file_data.ok_or_else(|| AppError::InvalidInput("empty file".to_string()))?;
    let original_filename = filename.unwrap_or_else(|| "file".to_string());

    Ok((file_data, original_filename))
}

#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    responses(
        (status = 200, description = "File stored", body = FileResponse),
        (status = 400, description = "Empty or missing file part", body = ErrorResponse),
        (status = 500, description = "Storage write failed", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<FileResponse>, HttpAppError> {
    let (data, original_filename) = extract_multipart_file(multipart).await?;

    if data.is_empty() {
        return Err(AppError::InvalidInput("empty file".to_string()).into());
    }

    // Sanitize here as well as in the backend: the facade owns parameter
    // validation, the backend owns its own key hygiene.
    let filename = sanitize_filename(&original_filename)?;

    let object = state
        .storage
        .put(&filename, data)
        .await
        .map_err(HttpAppError::from)?;

    tracing::debug!(id = %object.id, filename = %object.filename, "File uploaded");

    Ok(Json(FileResponse::from(object)))
}
