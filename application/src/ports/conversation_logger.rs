//! Port for structured conversation logging.
//!
//! Records what was sent to and received from models, plus every debate
//! event, in a machine-readable log (JSONL). This is separate from the
//! `tracing` diagnostics, which stay human-oriented and terse.

use serde_json::{Value, json};

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier: `llm_request`, `llm_response`, `llm_error`, `debate_event`.
    pub event_type: &'static str,
    /// Event-specific fields.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn llm_request(agent: &str, model: &str, prompt: &str, estimated_tokens: usize) -> Self {
        Self::new(
            "llm_request",
            json!({
                "agent": agent,
                "model": model,
                "estimated_tokens": estimated_tokens,
                "prompt": prompt,
            }),
        )
    }

    pub fn llm_response(agent: &str, model: &str, response: &str) -> Self {
        Self::new(
            "llm_response",
            json!({
                "agent": agent,
                "model": model,
                "bytes": response.len(),
                "response": response,
            }),
        )
    }

    pub fn llm_error(agent: &str, model: &str, error: &str) -> Self {
        Self::new(
            "llm_error",
            json!({
                "agent": agent,
                "model": model,
                "error": error,
            }),
        )
    }
}

/// Port for logging conversation events.
///
/// `log` is synchronous and infallible; a logger that cannot write drops
/// the event rather than disturbing the run.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
