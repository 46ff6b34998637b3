pub mod analytics;
pub mod chat;
pub mod feedback;
pub mod health;
pub mod trends;
pub mod upload;
pub mod uploads;
