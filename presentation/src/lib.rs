//! Presentation layer for doc-debate
//!
//! This crate contains CLI definitions, console formatting, progress
//! display and the interactive prompts.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;
pub mod prompt;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplInput};
pub use cli::commands::{Cli, Command, DebateArgs, OutputFormatArg};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{
    DebateProgress, FollowUpProgressReporter, RequestSpinner, SimpleFollowUpProgress,
};
pub use prompt::{CONTINUE_QUESTION, InteractiveContinuePrompt, ask_to_continue};
