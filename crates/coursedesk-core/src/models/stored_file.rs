use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An uploaded document as seen by the blob store.
///
/// `original_name` is the sanitized suffix of the storage key; the name the client sent is
/// only echoed back in the upload response and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub storage_key: String,
    pub original_name: String,
    pub uploaded_at_millis: i64,
    pub size_bytes: u64,
    pub mime_hint: String,
}
