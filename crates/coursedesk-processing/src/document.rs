//! Best-effort document text extraction
//!
//! Extraction enriches an upload response; it is never a precondition for the upload.
//! Every failure, including a panic inside the PDF parser, is reported as
//! [`ExtractionResult::Failed`] and never propagated to the caller.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use std::path::Path;

/// Maximum number of characters kept in a text preview
pub const PREVIEW_MAX_CHARS: usize = 800;

/// Client-facing note attached to a response when extraction fails
pub const EXTRACTION_FAILED_NOTE: &str = "Could not extract PDF text on server.";

/// Document formats the extractor knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Other,
}

impl DocumentFormat {
    /// Decide the format from the declared content type and the original filename.
    ///
    /// PDF when the MIME type is `application/pdf` (parameters ignored) or the extension
    /// is `.pdf` in any case.
    pub fn detect(content_type: Option<&str>, filename: &str) -> Self {
        let declared_pdf = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().eq_ignore_ascii_case("application/pdf"))
            .unwrap_or(false);

        let extension_pdf = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if declared_pdf || extension_pdf {
            DocumentFormat::Pdf
        } else {
            DocumentFormat::Other
        }
    }
}

/// Outcome of an extraction attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// The format is not one we extract from; nothing was attempted
    Skipped,
    Extracted {
        text_preview: String,
        page_count: Option<u32>,
    },
    Failed {
        reason: String,
    },
}

impl ExtractionResult {
    pub fn is_failed(&self) -> bool {
        matches!(self, ExtractionResult::Failed { .. })
    }
}

/// Trim `text` and keep at most [`PREVIEW_MAX_CHARS`] characters.
pub fn truncate_preview(text: &str) -> String {
    text.trim().chars().take(PREVIEW_MAX_CHARS).collect()
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Attempt extraction. Never fails; see [`ExtractionResult`].
    async fn extract(&self, data: Bytes, format: DocumentFormat) -> ExtractionResult;
}

/// PDF text extraction backed by `pdf-extract`.
///
/// Parsing runs on the blocking pool; the parser is CPU bound and can panic on
/// malformed input, which surfaces here as a join error.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, data: Bytes, format: DocumentFormat) -> ExtractionResult {
        if format != DocumentFormat::Pdf {
            return ExtractionResult::Skipped;
        }

        let size_bytes = data.len();
        let start = std::time::Instant::now();

        let result = match tokio::task::spawn_blocking(move || extract_pdf(&data)).await {
            Ok(Ok((text, pages))) => ExtractionResult::Extracted {
                text_preview: truncate_preview(&text),
                page_count: (pages > 0).then_some(pages),
            },
            Ok(Err(reason)) => ExtractionResult::Failed { reason },
            Err(join_err) if join_err.is_panic() => ExtractionResult::Failed {
                reason: "PDF parser panicked".to_string(),
            },
            Err(join_err) => ExtractionResult::Failed {
                reason: format!("PDF extraction task failed: {}", join_err),
            },
        };

        match &result {
            ExtractionResult::Failed { reason } => {
                tracing::warn!(size_bytes, error = %reason, "PDF text extraction failed");
            }
            ExtractionResult::Extracted { page_count, .. } => {
                tracing::debug!(
                    size_bytes,
                    page_count = ?page_count,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "PDF text extracted"
                );
            }
            ExtractionResult::Skipped => {}
        }

        result
    }
}

#[cfg(feature = "document")]
fn extract_pdf(data: &[u8]) -> Result<(String, u32), String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(data).map_err(|e| e.to_string())?;
    let page_count = pages.len() as u32;
    Ok((pages.join("\n\n"), page_count))
}

#[cfg(not(feature = "document"))]
fn extract_pdf(_data: &[u8]) -> Result<(String, u32), String> {
    Err("PDF support not enabled (document feature disabled)".to_string())
}
