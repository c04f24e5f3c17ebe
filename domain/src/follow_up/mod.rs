//! Satisfaction-driven follow-up loop (single participant).

pub mod entities;

pub use entities::{FollowUpRecord, FollowUpReport, FollowUpStatus, QaAttempt, StopReason};
