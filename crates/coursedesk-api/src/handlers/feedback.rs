use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use coursedesk_db::NewFeedback;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

pub const FEEDBACK_RECEIVED_MESSAGE: &str = "Feedback received successfully!";

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackAck {
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/feedback",
    tag = "feedback",
    request_body = NewFeedback,
    responses(
        (status = 200, description = "Feedback recorded", body = FeedbackAck),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 500, description = "Ledger write failed", body = ErrorResponse)
    )
)]
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    ValidatedJson(feedback): ValidatedJson<NewFeedback>,
) -> Result<Json<FeedbackAck>, HttpAppError> {
    let record = state.ledger.append(feedback).await?;
    tracing::debug!(feedback_id = record.id, "Feedback submitted");

    Ok(Json(FeedbackAck {
        message: FEEDBACK_RECEIVED_MESSAGE.to_string(),
    }))
}
