//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters implement.

pub mod continue_prompt;
pub mod conversation_logger;
pub mod document_loader;
pub mod llm_gateway;
pub mod progress;
pub mod token_estimator;
pub mod transcript;
