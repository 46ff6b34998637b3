//! In-memory storage backend.
//!
//! A test double for the local filesystem backend. Contents live only as long as the value.

use crate::traits::{describe, validate_key, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use coursedesk_core::StoredFile;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn put(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<StoredFile> {
        validate_key(storage_key)?;
        let size = data.len() as u64;
        self.files.write().await.insert(storage_key.to_string(), data);
        Ok(describe(storage_key, size))
    }

    async fn get(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        validate_key(storage_key)?;
        self.files
            .read()
            .await
            .get(storage_key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn list(&self) -> StorageResult<Vec<StoredFile>> {
        Ok(self
            .files
            .read()
            .await
            .iter()
            .map(|(key, data)| describe(key, data.len() as u64))
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
