//! Transcript port
//!
//! The transcript is append-only: [`TranscriptSink::start`] creates or
//! truncates it and writes the header exactly once, then each
//! [`TranscriptSink::append`] adds one complete section. Sinks never
//! rewrite bytes that were already written.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("{location}: {message}")]
    Io { location: String, message: String },

    #[error("Transcript was appended to before it was started")]
    NotStarted,
}

/// Destination of the Markdown debate log
pub trait TranscriptSink: Send {
    /// Create (or truncate) the transcript and write its header.
    fn start(&mut self, header: &str) -> Result<(), TranscriptError>;

    /// Append one complete question section.
    fn append(&mut self, section: &str) -> Result<(), TranscriptError>;
}
