//! Session configuration for multi-participant debates

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of questions requested from the question generator.
pub const DEFAULT_NUM_QUESTIONS: usize = 5;

/// Default number of debate rounds after round 0.
pub const DEFAULT_MAX_ROUNDS: u32 = 2;

/// How participants interact for each question
///
/// | Protocol | Round 0 | Rounds >= 1 | Synthesis input |
/// |----------|---------|-------------|-----------------|
/// | `Panel` | independent answers | none | flat answer list |
/// | `MultiRound` | independent answers | history-aware contributions | full history |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "protocol", rename_all = "snake_case")]
pub enum DebateProtocol {
    Panel,
    MultiRound { max_rounds: u32 },
}

impl DebateProtocol {
    /// Number of rounds after round 0. Always 0 for a panel.
    pub fn max_rounds(&self) -> u32 {
        match self {
            DebateProtocol::Panel => 0,
            DebateProtocol::MultiRound { max_rounds } => *max_rounds,
        }
    }

    pub fn is_multi_round(&self) -> bool {
        matches!(self, DebateProtocol::MultiRound { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DebateProtocol::Panel => "panel",
            DebateProtocol::MultiRound { .. } => "multi-round",
        }
    }
}

impl Default for DebateProtocol {
    fn default() -> Self {
        DebateProtocol::MultiRound {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Read-only inputs fixed when a debate session is constructed.
///
/// Participants are bound to `answer_documents` by position; the session
/// refuses to start when the two counts differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub num_questions: usize,
    pub protocol: DebateProtocol,
    pub question_document: PathBuf,
    pub answer_documents: Vec<PathBuf>,
    pub output_path: PathBuf,
}

impl SessionConfig {
    pub fn new(
        question_document: impl Into<PathBuf>,
        answer_documents: Vec<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            num_questions: DEFAULT_NUM_QUESTIONS,
            protocol: DebateProtocol::default(),
            question_document: question_document.into(),
            answer_documents,
            output_path: output_path.into(),
        }
    }

    pub fn with_num_questions(mut self, num_questions: usize) -> Self {
        self.num_questions = num_questions;
        self
    }

    pub fn with_protocol(mut self, protocol: DebateProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Check the participant/document binding.
    pub fn check_participants(&self, participants: usize) -> Result<(), DomainError> {
        if participants != self.answer_documents.len() {
            return Err(DomainError::ParticipantMismatch {
                participants,
                documents: self.answer_documents.len(),
            });
        }
        if participants == 0 {
            return Err(DomainError::InvalidConfig(
                "At least one answer agent must be provided.".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate values that do not depend on the participant list.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.num_questions == 0 {
            return Err(DomainError::InvalidConfig(
                "Number of questions must be at least 1.".to_string(),
            ));
        }
        Ok(())
    }
}
