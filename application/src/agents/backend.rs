//! Shared plumbing for LLM-backed agents: prompt budget and gateway calls.

use super::error::AgentError;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::token_estimator::TokenEstimator;
use debate_domain::{GenerationOptions, Model};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default maximum input tokens: a 128k context minus 4k reserved for output.
pub const DEFAULT_MAX_INPUT_TOKENS: usize = 128 * 1024 - 4 * 1024;

/// Rejects prompts whose estimated size exceeds the model's input limit.
#[derive(Clone)]
pub struct PromptBudget {
    estimator: Arc<dyn TokenEstimator>,
    max_input_tokens: usize,
}

impl PromptBudget {
    pub fn new(estimator: Arc<dyn TokenEstimator>, max_input_tokens: usize) -> Self {
        Self {
            estimator,
            max_input_tokens,
        }
    }

    pub fn max_input_tokens(&self) -> usize {
        self.max_input_tokens
    }

    /// Estimated token count of `prompt`, if it fits.
    pub fn check(&self, prompt: &str, model: &Model) -> Result<usize, AgentError> {
        let estimated = self
            .estimator
            .estimate(prompt, model)
            .ok_or(AgentError::TokenEstimation)?;

        if estimated > self.max_input_tokens {
            return Err(AgentError::ContextLength {
                estimated,
                limit: self.max_input_tokens,
            });
        }
        Ok(estimated)
    }
}

/// A gateway plus the budget and sampling options an agent calls it with.
///
/// Every call goes through the budget check first; a prompt that does not
/// fit never reaches the gateway.
#[derive(Clone)]
pub struct AgentBackend {
    gateway: Arc<dyn LlmGateway>,
    budget: PromptBudget,
    options: GenerationOptions,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AgentBackend {
    pub fn new(gateway: Arc<dyn LlmGateway>, budget: PromptBudget) -> Self {
        Self {
            gateway,
            budget,
            options: GenerationOptions::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn model(&self) -> &Model {
        self.gateway.model()
    }

    /// Send `prompt` and return the trimmed reply, which may be empty.
    pub(crate) async fn ask_raw(&self, agent: &str, prompt: &str) -> Result<String, AgentError> {
        let model = self.gateway.model().to_string();
        let estimated = self.budget.check(prompt, self.gateway.model())?;
        debug!("{agent}: sending ~{estimated} tokens to {model}");
        self.conversation_logger
            .log(ConversationEvent::llm_request(agent, &model, prompt, estimated));

        match self.gateway.complete(prompt, None, &self.options).await {
            Ok(reply) => {
                let reply = reply.trim().to_string();
                self.conversation_logger
                    .log(ConversationEvent::llm_response(agent, &model, &reply));
                Ok(reply)
            }
            Err(e) => {
                warn!("{agent}: request to {model} failed: {e}");
                self.conversation_logger
                    .log(ConversationEvent::llm_error(agent, &model, &e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Like [`ask_raw`](Self::ask_raw), but an empty reply is an invalid response.
    pub(crate) async fn ask(&self, agent: &str, prompt: &str) -> Result<String, AgentError> {
        let reply = self.ask_raw(agent, prompt).await?;
        if reply.is_empty() {
            return Err(GatewayError::InvalidResponse("empty reply".to_string()).into());
        }
        Ok(reply)
    }
}
