//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error(
        "The number of Answer Agents ({participants}) does not match the number of answer document paths ({documents})."
    )]
    ParticipantMismatch { participants: usize, documents: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("History entry for round {attempted} recorded after round {last}")]
    HistoryOutOfOrder { last: u32, attempted: u32 },
}

impl DomainError {
    /// Input validation failures are raised before any LLM call and are never retried.
    pub fn is_input_validation(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidQuestion(_)
                | DomainError::ParticipantMismatch { .. }
                | DomainError::InvalidConfig(_)
        )
    }
}
