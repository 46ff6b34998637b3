use crate::error::{HttpAppError, ValidatedJson};
use crate::services::chat::{reply_for, EMPTY_MESSAGE_REPLY};
use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Free text; numbers and booleans are read as their text form
    #[schema(value_type = Option<String>)]
    #[serde(default)]
    pub message: Option<Value>,
}

impl ChatRequest {
    fn text(&self) -> String {
        match &self.message {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatReply {
    pub reply: String,
}

#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Canned reply for the first matching keyword", body = ChatReply),
        (status = 400, description = "Blank message", body = ChatReply)
    )
)]
pub async fn chat(
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> Result<(StatusCode, Json<ChatReply>), HttpAppError> {
    let (status, reply) = match reply_for(&request.text()) {
        Some(reply) => (StatusCode::OK, reply),
        None => (StatusCode::BAD_REQUEST, EMPTY_MESSAGE_REPLY),
    };

    Ok((
        status,
        Json(ChatReply {
            reply: reply.to_string(),
        }),
    ))
}
