//! Interactive prompts

mod continue_prompt;

pub use continue_prompt::{CONTINUE_QUESTION, InteractiveContinuePrompt, ask_to_continue};
