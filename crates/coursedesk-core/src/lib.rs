//! Coursedesk Core Library
//!
//! This crate provides core domain models, error types and configuration
//! that are shared across all Coursedesk components.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, IntakeConfig, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{AnalyticsSnapshot, FeedbackRecord, RecentUpload, StoredFile};
