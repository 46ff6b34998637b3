//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::services::intake;
use coursedesk_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coursedesk API",
        version = "0.1.0",
        description = "Curriculum document intake: upload documents (with PDF text previews), serve them back, collect feedback, and report usage analytics."
    ),
    paths(
        handlers::upload::upload_curriculum,
        handlers::uploads::get_upload,
        handlers::feedback::submit_feedback,
        handlers::analytics::get_analytics,
        handlers::health::health_check,
        handlers::chat::chat,
        handlers::trends::get_trends,
    ),
    components(
        schemas(
            intake::UploadResponse,
            coursedesk_db::NewFeedback,
            handlers::feedback::FeedbackAck,
            models::AnalyticsSnapshot,
            models::RecentUpload,
            handlers::health::HealthResponse,
            handlers::chat::ChatRequest,
            handlers::chat::ChatReply,
            handlers::trends::TrendsResponse,
            handlers::trends::SkillDemand,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Document intake and retrieval"),
        (name = "feedback", description = "Feedback submissions"),
        (name = "analytics", description = "Usage counts derived from stored state"),
        (name = "health", description = "Liveness"),
        (name = "chat", description = "Keyword-driven help replies"),
        (name = "trends", description = "Industry skill demand"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_endpoint() {
        let spec = ApiDoc::openapi();
        for path in [
            "/api/upload",
            "/uploads/{filename}",
            "/api/feedback",
            "/api/analytics",
            "/api/health",
            "/api/chat",
            "/api/trends",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
