use crate::error::{ErrorResponse, HttpAppError};
use crate::services::intake::{extract_upload, IntakeService, UploadResponse};
use crate::state::AppState;
use axum::extract::{multipart::MultipartRejection, Multipart, State};
use axum::Json;
use coursedesk_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Document in the `curriculumFile` field"),
    responses(
        (status = 200, description = "File stored; PDF uploads carry a text preview or a parse note", body = UploadResponse),
        (status = 400, description = "No file uploaded", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_curriculum(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    // Anything that is not a multipart body cannot carry the file part
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "Upload without multipart body");
        HttpAppError(AppError::MissingFile)
    })?;

    let file = extract_upload(multipart).await?;
    let response = IntakeService::new(&state).accept(file).await?;
    Ok(Json(response))
}
