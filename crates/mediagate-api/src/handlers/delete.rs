use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::resolve_id_param;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File id (bare id or full `id__filename` key)")
    ),
    responses(
        (status = 204, description = "File deleted"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpAppError> {
    let id = resolve_id_param(&id);

    state
        .storage
        .delete(&id)
        .await
        .map_err(HttpAppError::from)?;

    tracing::debug!(id = %id, "File deleted");

    Ok(StatusCode::NO_CONTENT)
}
