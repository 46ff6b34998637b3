use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::stored_file::StoredFile;

/// Freshly computed usage counts; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub uploaded_files_count: usize,
    pub feedback_count: usize,
    /// Newest first, at most five entries
    pub recent_uploads: Vec<RecentUpload>,
}

impl AnalyticsSnapshot {
    pub fn empty() -> Self {
        Self {
            uploaded_files_count: 0,
            feedback_count: 0,
            recent_uploads: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentUpload {
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub uploaded_at_millis: i64,
    pub size_bytes: u64,
}

impl From<&StoredFile> for RecentUpload {
    fn from(file: &StoredFile) -> Self {
        RecentUpload {
            filename: file.storage_key.clone(),
            uploaded_at: DateTime::from_timestamp_millis(file.uploaded_at_millis)
                .unwrap_or_default(),
            uploaded_at_millis: file.uploaded_at_millis,
            size_bytes: file.size_bytes,
        }
    }
}
