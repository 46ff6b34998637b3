//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use coursedesk_core::StoredFile;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Blob store for uploaded documents.
///
/// Keys are produced by [`crate::keys::generate_storage_key`] and treated as opaque by the
/// backends, apart from rejecting keys that could escape the storage root.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `storage_key`, replacing any existing file with that key.
    async fn put(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<StoredFile>;

    /// Read back the exact bytes stored under `storage_key`.
    async fn get(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Enumerate every stored file. Order is unspecified.
    async fn list(&self) -> StorageResult<Vec<StoredFile>>;

    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}

/// Reject keys that are empty or could resolve outside the storage root.
///
/// Keys are single path components, so only separators and the `.`/`..` entries matter;
/// a dot run inside a filename such as `notes..v2.pdf` is fine.
pub(crate) fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty()
        || storage_key == "."
        || storage_key == ".."
        || storage_key.contains('/')
        || storage_key.contains('\\')
        || storage_key.contains('\0')
    {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Build the `StoredFile` summary for a key from the key itself.
pub(crate) fn describe(storage_key: &str, size_bytes: u64) -> StoredFile {
    let (uploaded_at_millis, suffix) = crate::keys::parse_storage_key(storage_key);
    StoredFile {
        storage_key: storage_key.to_string(),
        original_name: suffix.to_string(),
        uploaded_at_millis,
        size_bytes,
        mime_hint: crate::mime::mime_hint_for(storage_key).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_rejects_traversal() {
        assert!(matches!(validate_key("../secret"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(validate_key(".."), Err(StorageError::InvalidKey(_))));
        assert!(matches!(validate_key("a/b"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(validate_key("a\\b"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(validate_key(""), Err(StorageError::InvalidKey(_))));
        assert!(validate_key("1700000000000-plan.pdf").is_ok());
        assert!(validate_key("1700000000000-notes..v2.pdf").is_ok());
    }

    #[test]
    fn test_describe_parses_key() {
        let file = describe("1700000000000-plan.pdf", 12);
        assert_eq!(file.uploaded_at_millis, 1_700_000_000_000);
        assert_eq!(file.original_name, "plan.pdf");
        assert_eq!(file.mime_hint, "application/pdf");
        assert_eq!(file.size_bytes, 12);
    }
}
