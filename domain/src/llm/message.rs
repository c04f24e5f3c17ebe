//! Chat messages and request shaping for chat completion models

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Default sampling temperature when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Sampling parameters for a single request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: None,
        }
    }
}

impl GenerationOptions {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A provider-independent chat completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub options: GenerationOptions,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>, options: GenerationOptions) -> Self {
        Self { messages, options }
    }

    /// Single-prompt request with an optional system prompt.
    pub fn from_prompt(
        prompt: &str,
        system_prompt: Option<&str>,
        options: GenerationOptions,
    ) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt.filter(|s| !s.is_empty()) {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(prompt));
        Self::new(messages, options)
    }

    /// Rewrite the request so that `model` will accept it.
    ///
    /// - Without system role support, every system message is removed and
    ///   their contents (joined by a blank line) are prefixed to the first
    ///   user message as `[System instructions: ...]`. If there is no user
    ///   message the system content is dropped.
    /// - With a fixed temperature, the temperature is omitted.
    pub fn adapted_for(&self, model: &Model) -> ChatRequest {
        let mut messages = self.messages.clone();

        if !model.supports_system_role() {
            let instructions: Vec<String> = messages
                .iter()
                .filter(|m| m.role == Role::System)
                .map(|m| m.content.clone())
                .collect();
            messages.retain(|m| m.role != Role::System);

            if !instructions.is_empty()
                && let Some(first_user) = messages.iter_mut().find(|m| m.role == Role::User)
            {
                first_user.content = format!(
                    "[System instructions: {}]\n\n{}",
                    instructions.join("\n\n"),
                    first_user.content
                );
            }
        }

        let mut options = self.options.clone();
        if model.has_fixed_temperature() {
            options.temperature = None;
        }

        ChatRequest { messages, options }
    }

    /// Total characters across all message contents.
    pub fn content_len(&self) -> usize {
        self.messages.iter().map(|m| m.content.len()).sum()
    }
}
