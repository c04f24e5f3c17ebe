//! LLM Gateway port
//!
//! Defines the interface for sending chat completion requests to a model.

use async_trait::async_trait;
use debate_domain::{ChatRequest, GenerationOptions, Model};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The provider answered, but without usable text.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication bound to one model
///
/// Implementations (adapters) live in the infrastructure layer. They must
/// accept any [`ChatRequest`] and adapt it to the model's quirks (see
/// [`ChatRequest::adapted_for`]) instead of failing. An empty reply is an
/// error, never a successful empty string.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// The model every request is sent to
    fn model(&self) -> &Model;

    /// Conversation-style completion
    async fn chat(&self, request: &ChatRequest) -> Result<String, GatewayError>;

    /// Single completion with an optional system prompt
    async fn complete(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        options: &GenerationOptions,
    ) -> Result<String, GatewayError> {
        let request = ChatRequest::from_prompt(prompt, system_prompt, options.clone());
        self.chat(&request).await
    }
}
