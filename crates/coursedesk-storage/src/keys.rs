//! Shared key generation for storage backends.
//!
//! Key format: `{epoch_millis}-{sanitized}` where `sanitized` is the original filename with
//! every character outside `[A-Za-z0-9.\-_]` replaced by `_`.
//!
//! Two uploads of the same filename within the same millisecond produce the same key and
//! the later write replaces the earlier one. Nothing here tries to hide that.

use chrono::{DateTime, Utc};

/// Replace every character outside `[A-Za-z0-9.\-_]` with `_`.
///
/// Works per `char`, so a multi-byte character becomes a single `_`.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Generate the storage key for a file uploaded at `uploaded_at`.
pub fn generate_storage_key(original_filename: &str, uploaded_at: DateTime<Utc>) -> String {
    format!(
        "{}-{}",
        uploaded_at.timestamp_millis(),
        sanitize_filename(original_filename)
    )
}

/// Split a storage key into `(uploaded_at_millis, suffix)`.
///
/// Keys without a numeric prefix (files dropped into the uploads directory by hand, for
/// instance) report `0` so they sort as the oldest entries, and the whole key is the suffix.
pub fn parse_storage_key(key: &str) -> (i64, &str) {
    match key.split_once('-') {
        Some((prefix, suffix)) if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) => {
            match prefix.parse::<i64>() {
                Ok(millis) => (millis, suffix),
                Err(_) => (0, key),
            }
        }
        _ => (0, key),
    }
}
