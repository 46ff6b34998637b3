use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use coursedesk_core::AppError;
use coursedesk_storage::{mime_hint_for, StorageError};
use std::sync::Arc;

/// Serve a stored upload by its storage key. Unauthenticated.
#[utoipa::path(
    get,
    path = "/uploads/{filename}",
    tag = "uploads",
    params(
        ("filename" = String, Path, description = "Storage key returned by the upload endpoint")
    ),
    responses(
        (status = 200, description = "Raw file bytes", content_type = "application/octet-stream"),
        (status = 404, description = "No such file", body = ErrorResponse)
    )
)]
pub async fn get_upload(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let data = state.storage.get(&filename).await.map_err(|e| match e {
        StorageError::InvalidKey(_) | StorageError::NotFound(_) => {
            HttpAppError(AppError::NotFound("Not found".to_string()))
        }
        other => HttpAppError::from(other),
    })?;

    Ok(([(header::CONTENT_TYPE, mime_hint_for(&filename))], data))
}
