pub mod analytics;
pub mod feedback;
pub mod stored_file;

pub use analytics::{AnalyticsSnapshot, RecentUpload};
pub use feedback::FeedbackRecord;
pub use stored_file::StoredFile;
