//! Provider-independent chat completion requests.

pub mod message;

pub use message::{ChatMessage, ChatRequest, DEFAULT_TEMPERATURE, GenerationOptions, Role};
