//! Application state shared by every handler.

use crate::services::analytics::AnalyticsService;
use coursedesk_db::FeedbackLedger;
use coursedesk_processing::TextExtractor;
use coursedesk_storage::Storage;
use std::sync::Arc;

/// Storage root and ledger path are fixed at construction; handlers never see raw paths.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub ledger: Arc<dyn FeedbackLedger>,
    pub extractor: Arc<dyn TextExtractor>,
    pub analytics: AnalyticsService,
}
