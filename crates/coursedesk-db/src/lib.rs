//! Coursedesk persistence
//!
//! File-backed record stores. The only collection today is the feedback ledger: a single
//! JSON array on disk, rewritten in full on every append.

pub mod feedback;

pub use feedback::{
    FeedbackLedger, InMemoryLedger, JsonFileLedger, LedgerError, LedgerResult, NewFeedback,
};
