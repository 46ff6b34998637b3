use crate::traits::{describe, validate_key, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use coursedesk_core::StoredFile;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// In-flight uploads live under `.{key}.{pid}-{n}.tmp` until renamed into place.
fn is_temp_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(".tmp")
}

/// Write `data` to a new file at `path` and make it durable.
///
/// tokio's `write_all` only hands the last chunk to a background task; `flush` is what
/// surfaces that write's error.
async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.flush().await?;
    file.sync_all().await
}

/// Local filesystem storage implementation
///
/// One file per key directly under `base_path`.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for uploads (e.g., "./data/uploads")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Construct without touching the filesystem; the root is created on first `put`.
    pub fn lazy(base_path: impl Into<PathBuf>) -> Self {
        LocalStorage {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;
        Ok(self.base_path.join(storage_key))
    }

    fn temp_path(&self, storage_key: &str) -> PathBuf {
        self.base_path.join(format!(
            ".{}.{}-{}.tmp",
            storage_key,
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<StoredFile> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to create storage directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        // Nothing is visible under `storage_key` until the bytes are fully on disk
        let temp_path = self.temp_path(storage_key);
        let write = async {
            write_synced(&temp_path, &data).await?;
            fs::rename(&temp_path, &path).await
        };

        if let Err(e) = write.await {
            if let Err(cleanup_err) = fs::remove_file(&temp_path).await {
                if cleanup_err.kind() != ErrorKind::NotFound {
                    tracing::warn!(
                        error = %cleanup_err,
                        path = %temp_path.display(),
                        "Failed to remove partial upload"
                    );
                }
            }
            return Err(StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(describe(storage_key, size as u64))
    }

    async fn get(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(storage_key.to_string()));
            }
            Err(e) => {
                // Directories are never listed, so they are not stored files either
                let is_dir = fs::metadata(&path).await.is_ok_and(|m| m.is_dir());
                if is_dir {
                    return Err(StorageError::NotFound(storage_key.to_string()));
                }
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to read file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        tracing::debug!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(data)
    }

    async fn list(&self) -> StorageResult<Vec<StoredFile>> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::ListFailed(format!(
                    "Failed to read directory {}: {}",
                    self.base_path.display(),
                    e
                )));
            }
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                // Removed between read_dir and stat
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            if !metadata.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };
            if is_temp_name(&name) {
                continue;
            }
            files.push(describe(&name, metadata.len()));
        }

        Ok(files)
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
