//! Document intake
//!
//! Pipeline: read the multipart file part → derive the storage key → store → (PDF only)
//! read the stored bytes back and extract a text preview → build the response.
//!
//! Only the store step can fail the request. Extraction, and the read-back that feeds it,
//! only ever add a `pdfParseError` note to an otherwise successful response.

use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;
use chrono::Utc;
use coursedesk_core::AppError;
use coursedesk_processing::{DocumentFormat, ExtractionResult, EXTRACTION_FAILED_NOTE};
use coursedesk_storage::generate_storage_key;
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::UPLOAD_FIELD;
use crate::state::AppState;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully!";

/// File part pulled out of an upload request
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Client-supplied name; untrusted, used for display and key derivation only
    pub original_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    /// Storage key the file was saved under
    pub filename: String,
    pub originalname: String,
    #[serde(
        rename = "extractedTextPreview",
        skip_serializing_if = "Option::is_none"
    )]
    pub extracted_text_preview: Option<String>,
    #[serde(rename = "pageCount", skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(rename = "pdfParseError", skip_serializing_if = "Option::is_none")]
    pub pdf_parse_error: Option<String>,
}

impl UploadResponse {
    fn stored(storage_key: String, original_name: String) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            filename: storage_key,
            originalname: original_name,
            extracted_text_preview: None,
            page_count: None,
            pdf_parse_error: None,
        }
    }

    fn with_extraction(mut self, result: ExtractionResult) -> Self {
        match result {
            ExtractionResult::Skipped => {}
            ExtractionResult::Extracted {
                text_preview,
                page_count,
            } => {
                self.extracted_text_preview = Some(text_preview);
                self.page_count = page_count;
            }
            ExtractionResult::Failed { .. } => {
                self.pdf_parse_error = Some(EXTRACTION_FAILED_NOTE.to_string());
            }
        }
        self
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Pull the `curriculumFile` part out of a multipart body.
///
/// Other fields are skipped. A `curriculumFile` part without a filename is not a file and
/// is skipped too. When several file parts are sent the first one wins.
pub async fn extract_upload(mut multipart: Multipart) -> Result<IncomingFile, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(original_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await.map_err(multipart_error)?;

        return Ok(IncomingFile {
            original_name,
            content_type,
            data: data.to_vec(),
        });
    }

    Err(AppError::MissingFile)
}

pub struct IntakeService {
    state: Arc<AppState>,
}

impl IntakeService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Store the file and, for PDFs, attach a best-effort text preview.
    #[tracing::instrument(skip(self, file), fields(original_name = %file.original_name, size_bytes = file.data.len()))]
    pub async fn accept(&self, file: IncomingFile) -> Result<UploadResponse, AppError> {
        let storage_key = generate_storage_key(&file.original_name, Utc::now());
        let format = DocumentFormat::detect(file.content_type.as_deref(), &file.original_name);

        let stored = self
            .state
            .storage
            .put(&storage_key, file.data)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key = %storage_key, "Failed to store upload");
                AppError::UploadFailed(e.to_string())
            })?;

        tracing::info!(
            key = %stored.storage_key,
            size_bytes = stored.size_bytes,
            format = ?format,
            "Upload stored"
        );

        let response = UploadResponse::stored(stored.storage_key, file.original_name);
        if format != DocumentFormat::Pdf {
            return Ok(response);
        }

        let extraction = self.extract_stored(&response.filename, format).await;
        Ok(response.with_extraction(extraction))
    }

    /// Extract from the bytes as stored, not from the request body.
    async fn extract_stored(&self, storage_key: &str, format: DocumentFormat) -> ExtractionResult {
        match self.state.storage.get(storage_key).await {
            Ok(data) => self.state.extractor.extract(Bytes::from(data), format).await,
            Err(e) => {
                tracing::warn!(error = %e, key = %storage_key, "Failed to read back upload for extraction");
                ExtractionResult::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::services::build_state;
    use async_trait::async_trait;
    use coursedesk_db::InMemoryLedger;
    use coursedesk_processing::TextExtractor;
    use coursedesk_storage::{InMemoryStorage, Storage};

    /// Extractor double that reports a fixed outcome for PDFs
    struct FixedExtractor(ExtractionResult);

    #[async_trait]
    impl TextExtractor for FixedExtractor {
        async fn extract(&self, _data: Bytes, format: DocumentFormat) -> ExtractionResult {
            if format == DocumentFormat::Pdf {
                self.0.clone()
            } else {
                ExtractionResult::Skipped
            }
        }
    }

    fn service_with(extractor: ExtractionResult) -> (IntakeService, InMemoryStorage) {
        let storage = InMemoryStorage::new();
        let state = build_state(
            Arc::new(storage.clone()),
            Arc::new(InMemoryLedger::new()),
            Arc::new(FixedExtractor(extractor)),
        );
        (IntakeService::new(&state), storage)
    }

    fn incoming(name: &str, content_type: Option<&str>, data: &[u8]) -> IncomingFile {
        IncomingFile {
            original_name: name.to_string(),
            content_type: content_type.map(str::to_owned),
            data: data.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_text_upload_is_stored_without_extraction() {
        let (service, storage) = service_with(ExtractionResult::Skipped);

        let response = service
            .accept(incoming("notes (final).txt", Some("text/plain"), b"hello"))
            .await
            .unwrap();

        assert_eq!(response.message, UPLOAD_SUCCESS_MESSAGE);
        assert_eq!(response.originalname, "notes (final).txt");
        assert!(response.filename.ends_with("-notes__final_.txt"));
        assert_eq!(response.extracted_text_preview, None);
        assert_eq!(response.pdf_parse_error, None);
        assert_eq!(storage.get(&response.filename).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_pdf_extraction_fills_preview() {
        let (service, _) = service_with(ExtractionResult::Extracted {
            text_preview: "Week 1: Foundations".to_string(),
            page_count: Some(3),
        });

        let response = service
            .accept(incoming("plan.PDF", None, b"%PDF-1.4"))
            .await
            .unwrap();

        assert_eq!(
            response.extracted_text_preview.as_deref(),
            Some("Week 1: Foundations")
        );
        assert_eq!(response.page_count, Some(3));
        assert_eq!(response.pdf_parse_error, None);
    }

    #[tokio::test]
    async fn test_pdf_extraction_failure_still_succeeds() {
        let (service, storage) = service_with(ExtractionResult::Failed {
            reason: "bad xref".to_string(),
        });

        let response = service
            .accept(incoming("broken.bin", Some("application/pdf"), b"garbage"))
            .await
            .unwrap();

        assert_eq!(response.pdf_parse_error.as_deref(), Some(EXTRACTION_FAILED_NOTE));
        assert_eq!(response.extracted_text_preview, None);
        assert_eq!(storage.list().await.unwrap().len(), 1);
    }

    #[test]
    fn test_upload_response_omits_absent_fields() {
        let json = serde_json::to_value(UploadResponse::stored(
            "1-a.txt".to_string(),
            "a.txt".to_string(),
        ))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": "File uploaded successfully!",
                "filename": "1-a.txt",
                "originalname": "a.txt"
            })
        );
    }
}
