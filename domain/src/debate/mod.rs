//! Multi-participant debate domain: history, events, configuration and
//! transcript rendering.

pub mod config;
pub mod event;
pub mod history;
pub mod transcript;

pub use config::{DEFAULT_MAX_ROUNDS, DEFAULT_NUM_QUESTIONS, DebateProtocol, SessionConfig};
pub use event::{DebateEvent, EventLevel, Speaker};
pub use history::{DebateHistory, DebateHistoryEntry, EMPTY_HISTORY_TEXT};
