//! Construction of the storage, ledger and extraction backends.

use crate::services::analytics::AnalyticsService;
use crate::state::AppState;
use anyhow::{Context, Result};
use coursedesk_core::Config;
use coursedesk_db::{FeedbackLedger, JsonFileLedger};
use coursedesk_processing::{PdfTextExtractor, TextExtractor};
use coursedesk_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Build the production backends from configuration.
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let storage = LocalStorage::new(config.uploads_dir())
        .await
        .with_context(|| {
            format!(
                "Failed to initialize upload storage at {}",
                config.uploads_dir().display()
            )
        })?;
    tracing::info!(
        backend = storage.backend_name(),
        path = %storage.base_path().display(),
        "Storage initialized"
    );

    let ledger = JsonFileLedger::new(config.feedback_file());
    tracing::info!(path = %ledger.path().display(), "Feedback ledger configured");

    Ok(build_state(
        Arc::new(storage),
        Arc::new(ledger),
        Arc::new(PdfTextExtractor::new()),
    ))
}

/// Assemble the state from already-built backends.
pub fn build_state(
    storage: Arc<dyn Storage>,
    ledger: Arc<dyn FeedbackLedger>,
    extractor: Arc<dyn TextExtractor>,
) -> Arc<AppState> {
    let analytics = AnalyticsService::new(storage.clone(), ledger.clone());
    Arc::new(AppState {
        storage,
        ledger,
        extractor,
        analytics,
    })
}
