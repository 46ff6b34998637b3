//! Coursedesk Processing Library
//!
//! Content processing for uploaded documents. Currently this is best-effort text
//! extraction from PDF payloads; other formats pass through untouched.

pub mod document;

pub use document::{
    truncate_preview, DocumentFormat, ExtractionResult, PdfTextExtractor, TextExtractor,
    EXTRACTION_FAILED_NOTE, PREVIEW_MAX_CHARS,
};
