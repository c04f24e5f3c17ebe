//! Use cases
//!
//! Application-level operations that orchestrate the agents.
//!
//! | Use case | Protocol |
//! |----------|----------|
//! | [`run_debate::DebateSession`] | Panel and multi-round debate, pulled one event at a time |
//! | [`run_follow_up::RunFollowUpUseCase`] | Satisfaction-driven follow-up loop, one participant |
//! | [`ask_document::AskDocumentUseCase`] | Single-turn chat against one document |
//! | [`generate_questions::GenerateQuestionsUseCase`] | Question generation only |

pub mod ask_document;
pub mod generate_questions;
pub mod run_debate;
pub mod run_follow_up;
