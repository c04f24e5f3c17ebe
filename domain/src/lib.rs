//! Domain layer for doc-debate
//!
//! This crate contains the core types and pure logic of document-grounded
//! question answering. It performs no I/O and has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Participants
//!
//! An answer participant is bound to exactly one source document. It
//! answers questions strictly from that document, first independently
//! (round 0) and then, in a multi-round debate, with visibility into
//! everything said so far.
//!
//! ## Protocols
//!
//! - **Follow-up loop**: one participant; each answer is judged and, when
//!   unsatisfactory, a refined question is asked (bounded attempts)
//! - **Panel**: N participants answer once; a synthesizer merges the answers
//! - **Multi-round debate**: N participants answer, then debate for R rounds;
//!   the synthesizer reads the whole history

pub mod config;
pub mod core;
pub mod debate;
pub mod follow_up;
pub mod llm;
pub mod parsing;
pub mod prompt;
pub mod providers;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    document::{Document, display_name},
    error::DomainError,
    model::Model,
    question::Question,
};
pub use debate::{
    DEFAULT_MAX_ROUNDS, DEFAULT_NUM_QUESTIONS, DebateEvent, DebateHistory, DebateHistoryEntry,
    DebateProtocol, EMPTY_HISTORY_TEXT, EventLevel, SessionConfig, Speaker,
};
pub use follow_up::{FollowUpRecord, FollowUpReport, FollowUpStatus, QaAttempt, StopReason};
pub use llm::{ChatMessage, ChatRequest, DEFAULT_TEMPERATURE, GenerationOptions, Role};
pub use parsing::{
    ParsedAssessment, Verdict, parse_follow_up, parse_question_list, parse_structured_reply,
    strip_list_marker,
};
pub use prompt::PromptTemplate;
pub use providers::{EndpointConfig, NetworkConfig, ProviderConfig, ProviderKind};
