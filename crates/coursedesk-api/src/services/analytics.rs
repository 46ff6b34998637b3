//! Usage analytics derived from stored uploads and the feedback ledger.
//!
//! Nothing is cached: every snapshot re-lists the storage root and re-reads the ledger. The
//! two reads are not isolated from each other, so a snapshot taken during an upload may count
//! a file that a concurrent list did not see yet.

use coursedesk_core::{AnalyticsSnapshot, RecentUpload, StoredFile};
use coursedesk_db::FeedbackLedger;
use coursedesk_storage::Storage;
use std::cmp::Ordering;
use std::sync::Arc;

/// Number of entries in `recentUploads`
pub const RECENT_UPLOADS_LIMIT: usize = 5;

#[derive(Clone)]
pub struct AnalyticsService {
    storage: Arc<dyn Storage>,
    ledger: Arc<dyn FeedbackLedger>,
}

impl AnalyticsService {
    pub fn new(storage: Arc<dyn Storage>, ledger: Arc<dyn FeedbackLedger>) -> Self {
        Self { storage, ledger }
    }

    /// Compute a fresh snapshot. Never fails; an unreadable source contributes zero.
    pub async fn snapshot(&self) -> AnalyticsSnapshot {
        let files = match self.storage.list().await {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    backend = self.storage.backend_name(),
                    "Failed to list uploads for analytics"
                );
                Vec::new()
            }
        };

        let feedback_count = self.ledger.count().await;
        let uploaded_files_count = files.len();

        AnalyticsSnapshot {
            uploaded_files_count,
            feedback_count,
            recent_uploads: recent_uploads(files, RECENT_UPLOADS_LIMIT),
        }
    }
}

/// Newest first by key timestamp; equal timestamps fall back to the key, descending.
fn newest_first(a: &StoredFile, b: &StoredFile) -> Ordering {
    b.uploaded_at_millis
        .cmp(&a.uploaded_at_millis)
        .then_with(|| b.storage_key.cmp(&a.storage_key))
}

fn recent_uploads(mut files: Vec<StoredFile>, limit: usize) -> Vec<RecentUpload> {
    files.sort_by(newest_first);
    files.iter().take(limit).map(RecentUpload::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use coursedesk_db::{InMemoryLedger, NewFeedback};
    use coursedesk_storage::{InMemoryStorage, StorageError, StorageResult};

    struct UnlistableStorage;

    #[async_trait]
    impl Storage for UnlistableStorage {
        async fn put(&self, _key: &str, _data: Vec<u8>) -> StorageResult<StoredFile> {
            Err(StorageError::UploadFailed("unavailable".to_string()))
        }

        async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
            Err(StorageError::NotFound(key.to_string()))
        }

        async fn list(&self) -> StorageResult<Vec<StoredFile>> {
            Err(StorageError::ListFailed("permission denied".to_string()))
        }

        fn backend_name(&self) -> &'static str {
            "unlistable"
        }
    }

    #[tokio::test]
    async fn test_empty_sources_give_empty_snapshot() {
        let service = AnalyticsService::new(
            Arc::new(InMemoryStorage::new()),
            Arc::new(InMemoryLedger::new()),
        );
        assert_eq!(service.snapshot().await, AnalyticsSnapshot::empty());
    }

    #[tokio::test]
    async fn test_recent_uploads_newest_first_and_bounded() {
        let storage = InMemoryStorage::new();
        for millis in [3_000, 1_000, 7_000, 5_000, 2_000, 6_000, 4_000] {
            storage
                .put(&format!("{}-doc.pdf", millis), vec![0u8; 10])
                .await
                .unwrap();
        }
        let ledger = InMemoryLedger::new();
        ledger
            .append(NewFeedback::new("Ada", "ada@example.com", "hi"))
            .await
            .unwrap();

        let snapshot = AnalyticsService::new(Arc::new(storage), Arc::new(ledger))
            .snapshot()
            .await;

        assert_eq!(snapshot.uploaded_files_count, 7);
        assert_eq!(snapshot.feedback_count, 1);
        let millis: Vec<i64> = snapshot
            .recent_uploads
            .iter()
            .map(|u| u.uploaded_at_millis)
            .collect();
        assert_eq!(millis, vec![7_000, 6_000, 5_000, 4_000, 3_000]);
        assert_eq!(snapshot.recent_uploads[0].filename, "7000-doc.pdf");
        assert_eq!(snapshot.recent_uploads[0].size_bytes, 10);
    }

    #[tokio::test]
    async fn test_snapshot_is_stable_without_writes() {
        let storage = InMemoryStorage::new();
        storage.put("20-b.pdf", b"xy".to_vec()).await.unwrap();
        storage.put("20-a.pdf", b"x".to_vec()).await.unwrap();
        let service = AnalyticsService::new(Arc::new(storage), Arc::new(InMemoryLedger::new()));

        assert_eq!(service.snapshot().await, service.snapshot().await);
    }

    #[tokio::test]
    async fn test_unprefixed_keys_sort_oldest() {
        let storage = InMemoryStorage::new();
        storage.put("readme.txt", b"x".to_vec()).await.unwrap();
        storage.put("10-a.txt", b"x".to_vec()).await.unwrap();

        let snapshot = AnalyticsService::new(Arc::new(storage), Arc::new(InMemoryLedger::new()))
            .snapshot()
            .await;

        assert_eq!(snapshot.recent_uploads[0].filename, "10-a.txt");
        assert_eq!(snapshot.recent_uploads[1].filename, "readme.txt");
        assert_eq!(snapshot.recent_uploads[1].uploaded_at_millis, 0);
    }

    #[test]
    fn test_equal_timestamps_break_ties_by_key() {
        let file = |key: &str| StoredFile {
            storage_key: key.to_string(),
            original_name: key.to_string(),
            uploaded_at_millis: 42,
            size_bytes: 1,
            mime_hint: "text/plain".to_string(),
        };
        let recent = recent_uploads(vec![file("42-a.txt"), file("42-c.txt"), file("42-b.txt")], 5);
        let names: Vec<&str> = recent.iter().map(|u| u.filename.as_str()).collect();
        assert_eq!(names, vec!["42-c.txt", "42-b.txt", "42-a.txt"]);
    }

    #[tokio::test]
    async fn test_list_failure_degrades_to_zero() {
        let ledger = InMemoryLedger::new();
        ledger
            .append(NewFeedback::new("Ada", "ada@example.com", "hi"))
            .await
            .unwrap();

        let snapshot = AnalyticsService::new(Arc::new(UnlistableStorage), Arc::new(ledger))
            .snapshot()
            .await;

        assert_eq!(snapshot.uploaded_files_count, 0);
        assert!(snapshot.recent_uploads.is_empty());
        assert_eq!(snapshot.feedback_count, 1);
    }
}
