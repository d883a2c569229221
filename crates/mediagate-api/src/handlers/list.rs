use crate::error::HttpAppError;
use crate::models::FileResponse;
use crate::state::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    responses(
        (status = 200, description = "All stored files; empty array when storage is empty", body = [FileResponse])
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FileResponse>>, HttpAppError> {
    let objects = state.storage.list().await.map_err(HttpAppError::from)?;

    Ok(Json(objects.into_iter().map(FileResponse::from).collect()))
}
