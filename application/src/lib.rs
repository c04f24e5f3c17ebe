//! Application layer for doc-debate
//!
//! This crate contains the agents, the port definitions they depend on and
//! the use cases that drive them. It depends only on the domain layer.

pub mod agents;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use agents::{
    AgentBackend, AgentError, AnswerParticipant, Assessment, DEFAULT_MAX_INPUT_TOKENS,
    FollowUpGenerator, PromptBudget, QuestionGenerator, SatisfactionJudge, Synthesizer,
};
pub use ports::{
    continue_prompt::{AlwaysContinue, ContinuePrompt},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    document_loader::{DocumentError, DocumentLoader},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{FollowUpProgressNotifier, NoFollowUpProgress},
    token_estimator::TokenEstimator,
    transcript::{TranscriptError, TranscriptSink},
};
pub use use_cases::ask_document::AskDocumentUseCase;
pub use use_cases::generate_questions::{GenerateQuestionsError, GenerateQuestionsUseCase};
pub use use_cases::run_debate::{
    DebateAgents, DebateSession, DebateSetupError, QuestionOutcome, verify_setup,
};
pub use use_cases::run_follow_up::{
    FollowUpAgents, RunFollowUpError, RunFollowUpInput, RunFollowUpUseCase,
};
