//! Agent-level errors

use crate::ports::document_loader::DocumentError;
use crate::ports::llm_gateway::GatewayError;
use thiserror::Error;

/// Why an agent could not produce its output.
///
/// Validation and budget failures (`EmptyDocument`, `EmptyQuestion`,
/// `TokenEstimation`, `ContextLength`) are detected before the model is
/// called and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("Report content is empty.")]
    EmptyDocument,

    #[error("Query cannot be empty.")]
    EmptyQuestion,

    #[error("Could not estimate the token count of the prompt")]
    TokenEstimation,

    #[error("Estimated prompt size ({estimated} tokens) exceeds the maximum input of {limit} tokens")]
    ContextLength { estimated: usize, limit: usize },

    #[error("LLM request failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl AgentError {
    pub fn is_context_length(&self) -> bool {
        matches!(self, AgentError::ContextLength { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AgentError::Document(e) if e.is_not_found())
    }

    /// Human-readable answer text standing in for a failed answer.
    pub fn to_answer_text(&self) -> String {
        format!("Error: {self}")
    }
}
