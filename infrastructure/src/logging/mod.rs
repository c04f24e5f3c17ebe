//! Conversation log adapter
//!
//! [`JsonlConversationLogger`] implements the
//! [`ConversationLogger`](debate_application::ConversationLogger) port by
//! writing one JSON object per line.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
