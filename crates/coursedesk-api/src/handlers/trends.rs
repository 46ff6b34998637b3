use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Fixed skill-demand table; there is no live data source behind it.
const SKILL_DEMAND: &[(&str, f64)] = &[
    ("Data Structures & Algorithms", 0.9),
    ("Machine Learning", 0.87),
    ("Cloud Computing (AWS/GCP/Azure)", 0.85),
    ("Web Development (React/Node)", 0.82),
    ("Cybersecurity", 0.7),
];

const SUGGESTED_TOPICS: &[&str] = &[
    "Hands-on ML projects",
    "Cloud-native architecture modules",
    "Industry-led capstone projects",
];

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillDemand {
    pub skill: String,
    /// Relative demand between 0 and 1
    pub demand_score: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendsResponse {
    pub last_updated: DateTime<Utc>,
    pub skills: Vec<SkillDemand>,
    pub suggested_topics: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/trends",
    tag = "trends",
    responses(
        (status = 200, description = "Industry skill demand used to compare curricula", body = TrendsResponse)
    )
)]
pub async fn get_trends() -> Json<TrendsResponse> {
    Json(TrendsResponse {
        last_updated: Utc::now(),
        skills: SKILL_DEMAND
            .iter()
            .map(|(skill, score)| SkillDemand {
                skill: skill.to_string(),
                demand_score: *score,
            })
            .collect(),
        suggested_topics: SUGGESTED_TOPICS.iter().map(|t| t.to_string()).collect(),
    })
}
