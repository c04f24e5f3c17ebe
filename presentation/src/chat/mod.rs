//! Interactive chat module
//!
//! Provides a readline-based interface for asking questions about one document.

mod repl;

pub use repl::{ChatRepl, ReplInput};
