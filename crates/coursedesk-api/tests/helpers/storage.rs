//! Storage doubles for failure scenarios.

use async_trait::async_trait;
use coursedesk_core::StoredFile;
use coursedesk_storage::{Storage, StorageError, StorageResult};

/// Rejects every write, as a full or read-only disk would.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn put(&self, storage_key: &str, _data: Vec<u8>) -> StorageResult<StoredFile> {
        Err(StorageError::UploadFailed(format!(
            "Failed to create file /srv/uploads/{}: No space left on device",
            storage_key
        )))
    }

    async fn get(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        Err(StorageError::NotFound(storage_key.to_string()))
    }

    async fn list(&self) -> StorageResult<Vec<StoredFile>> {
        Ok(Vec::new())
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
