//! Content-type hints derived from a storage key's extension.
//!
//! The blob store keeps no side metadata, so the MIME type reported for a stored file is a
//! best guess from its extension. It is used for `Content-Type` when serving files back.

use std::path::Path;

const FALLBACK: &str = "application/octet-stream";

/// Guess a MIME type from the extension of `key`.
pub fn mime_hint_for(key: &str) -> &'static str {
    let extension = Path::new(key)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        // Documents
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "odt" => "application/vnd.oasis.opendocument.text",
        "rtf" => "application/rtf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        // Archives
        "zip" => "application/zip",
        "tar" => "application/x-tar",
        "gz" => "application/gzip",
        _ => FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_hint_for_known_extensions() {
        assert_eq!(mime_hint_for("1700000000000-plan.PDF"), "application/pdf");
        assert_eq!(mime_hint_for("1-notes__final_.txt"), "text/plain");
    }

    #[test]
    fn test_mime_hint_for_unknown_or_missing_extension() {
        assert_eq!(mime_hint_for("1-blob.xyz"), FALLBACK);
        assert_eq!(mime_hint_for("1-noext"), FALLBACK);
    }
}
