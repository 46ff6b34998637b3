//! Feedback ledger
//!
//! An append-only collection of [`FeedbackRecord`]s persisted as one pretty-printed JSON
//! array. Each append is a full read-modify-write; the write goes to a temporary file that
//! is renamed over the ledger, so readers see either the old or the new collection and
//! never a partial one.
//!
//! There is no locking. Two appends racing on the same file are last-writer-wins and the
//! loser's record can be dropped. A missing or unparseable ledger, or one whose top level is
//! not an array, reads as empty. Entries that do not match [`FeedbackRecord`] are counted and
//! written back unchanged, but never returned by `read_all`.

use async_trait::async_trait;
use chrono::Utc;
use coursedesk_core::FeedbackRecord;
use serde::Deserialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Failed to write ledger {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode ledger: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Feedback submission as received from a client; every field is required.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewFeedback {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// A submission whose required fields are all present
#[derive(Debug, Clone)]
struct ValidFeedback {
    name: String,
    email: String,
    message: String,
}

impl NewFeedback {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }

    /// Check fields in order name, email, message; the first absent or empty one rejects.
    fn validate(self) -> LedgerResult<ValidFeedback> {
        fn required(value: Option<String>, field: &'static str) -> LedgerResult<String> {
            match value {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(LedgerError::MissingField(field)),
            }
        }

        Ok(ValidFeedback {
            name: required(self.name, "name")?,
            email: required(self.email, "email")?,
            message: required(self.message, "message")?,
        })
    }
}

impl ValidFeedback {
    fn into_record(self) -> FeedbackRecord {
        let submitted_at = Utc::now();
        FeedbackRecord {
            id: submitted_at.timestamp_millis(),
            name: self.name,
            email: self.email,
            message: self.message,
            submitted_at,
        }
    }
}

#[async_trait]
pub trait FeedbackLedger: Send + Sync {
    /// Validate and append a submission. An invalid submission leaves the ledger untouched.
    async fn append(&self, feedback: NewFeedback) -> LedgerResult<FeedbackRecord>;

    /// Every stored record, oldest first. Empty when the ledger is missing or corrupt.
    async fn read_all(&self) -> Vec<FeedbackRecord>;

    /// Number of stored entries, including ones `read_all` cannot decode.
    async fn count(&self) -> usize;
}

/// Ledger persisted as a JSON array at a fixed path
#[derive(Clone, Debug)]
pub struct JsonFileLedger {
    path: PathBuf,
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

impl JsonFileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ledger".to_string());
        let unique = format!(
            ".{}.{}-{}.tmp",
            file_name,
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        self.path.with_file_name(unique)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> LedgerError {
        LedgerError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Replace the ledger with `entries` via temp file + rename.
    async fn write_all(&self, entries: &[Value]) -> LedgerResult<()> {
        let encoded = serde_json::to_vec_pretty(entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(parent, e))?;
        }

        let temp_path = self.temp_path();
        let write = async {
            write_synced(&temp_path, &encoded).await?;
            fs::rename(&temp_path, &self.path).await
        };

        if let Err(e) = write.await {
            if let Err(cleanup_err) = fs::remove_file(&temp_path).await {
                if cleanup_err.kind() != ErrorKind::NotFound {
                    tracing::debug!(
                        error = %cleanup_err,
                        path = %temp_path.display(),
                        "Failed to remove temporary ledger file"
                    );
                }
            }
            return Err(self.io_error(&self.path, e));
        }

        Ok(())
    }

    /// Raw entries as stored; empty when the file is missing, unreadable or not an array.
    async fn read_entries(&self) -> Vec<Value> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Failed to read feedback ledger, treating as empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<Value>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Feedback ledger is corrupt, treating as empty"
                );
                Vec::new()
            }
        }
    }
}

/// Write `buf` to a new file at `path` and sync it.
///
/// `flush` must run before `sync_all`: tokio reports the error of the last queued write
/// only from `flush`.
async fn write_synced(path: &Path, buf: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(buf).await?;
    file.flush().await?;
    file.sync_all().await
}

#[async_trait]
impl FeedbackLedger for JsonFileLedger {
    #[tracing::instrument(skip(self, feedback), fields(ledger.path = %self.path.display()))]
    async fn append(&self, feedback: NewFeedback) -> LedgerResult<FeedbackRecord> {
        let record = feedback.validate()?.into_record();

        let mut entries = self.read_entries().await;
        entries.push(serde_json::to_value(&record)?);
        self.write_all(&entries).await?;

        tracing::info!(
            feedback_id = record.id,
            ledger_len = entries.len(),
            "Feedback appended"
        );

        Ok(record)
    }

    async fn read_all(&self) -> Vec<FeedbackRecord> {
        self.read_entries()
            .await
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!(index, error = %e, "Skipping unrecognised ledger entry");
                    None
                }
            })
            .collect()
    }

    async fn count(&self) -> usize {
        self.read_entries().await.len()
    }
}

/// In-memory ledger used as a test double
#[derive(Clone, Default)]
pub struct InMemoryLedger {
    records: Arc<RwLock<Vec<FeedbackRecord>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackLedger for InMemoryLedger {
    async fn append(&self, feedback: NewFeedback) -> LedgerResult<FeedbackRecord> {
        let record = feedback.validate()?.into_record();
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn read_all(&self) -> Vec<FeedbackRecord> {
        self.records.read().await.clone()
    }

    async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}
