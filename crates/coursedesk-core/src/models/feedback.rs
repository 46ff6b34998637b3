use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single feedback submission as stored in the ledger file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackRecord {
    /// Submission time in epoch milliseconds; not unique under concurrent submissions
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "date")]
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_record_serializes_date_field() {
        let record = FeedbackRecord {
            id: 1_700_000_000_000,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Great".to_string(),
            submitted_at: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2023-11-14T22:13:20Z");
        assert!(json.get("submitted_at").is_none());
    }

    #[test]
    fn test_feedback_record_reads_legacy_entry() {
        let raw = r#"{"id":1714000000000,"name":"A","email":"a@b.c","message":"hi","date":"2024-04-24T23:06:40.000Z"}"#;
        let record: FeedbackRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, 1_714_000_000_000);
        assert_eq!(record.submitted_at.timestamp_millis(), 1_714_000_000_000);
    }
}
