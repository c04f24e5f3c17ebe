//! LLM-backed agents
//!
//! | Agent | Input | Output | On model failure |
//! |-------|-------|--------|------------------|
//! | [`QuestionGenerator`] | document, count | questions | empty list |
//! | [`AnswerParticipant`] | question, document (+ history) | answer | error |
//! | [`SatisfactionJudge`] | question, answer | [`Assessment`] | unsatisfied |
//! | [`FollowUpGenerator`] | question, answer | follow-up question | none |
//! | [`Synthesizer`] | question, answers or history | final answer | error |
//!
//! Every agent checks its prompt against the [`PromptBudget`] before
//! calling the model.

pub mod answer_participant;
pub mod backend;
pub mod error;
pub mod follow_up_generator;
pub mod question_generator;
pub mod satisfaction_judge;
pub mod synthesizer;

pub use answer_participant::AnswerParticipant;
pub use backend::{AgentBackend, DEFAULT_MAX_INPUT_TOKENS, PromptBudget};
pub use error::AgentError;
pub use follow_up_generator::FollowUpGenerator;
pub use question_generator::QuestionGenerator;
pub use satisfaction_judge::{Assessment, SatisfactionJudge};
pub use synthesizer::{EMPTY_SYNTHESIS_TEXT, Synthesizer};
