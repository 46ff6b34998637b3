//! Coursedesk Storage Library
//!
//! Blob storage for uploaded curriculum documents.
//!
//! # Storage key format
//!
//! Every key is `{epoch_millis}-{sanitized_original_name}`. The millisecond prefix makes
//! keys sort chronologically and lets `list()` recover the upload time without any
//! side metadata. Key generation and parsing live in the `keys` module so all backends
//! agree on the format.

pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
pub mod mime;
pub mod traits;

// Re-export commonly used types
pub use keys::{generate_storage_key, parse_storage_key, sanitize_filename};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::InMemoryStorage;
pub use mime::mime_hint_for;
pub use traits::{Storage, StorageError, StorageResult};
