use crate::state::AppState;
use axum::{extract::State, Json};
use coursedesk_core::AnalyticsSnapshot;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/analytics",
    tag = "analytics",
    responses(
        (status = 200, description = "Upload and feedback counts with the five newest uploads", body = AnalyticsSnapshot)
    )
)]
pub async fn get_analytics(State(state): State<Arc<AppState>>) -> Json<AnalyticsSnapshot> {
    Json(state.analytics.snapshot().await)
}
