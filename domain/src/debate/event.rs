//! Events emitted by a debate session

use std::fmt;

/// Who an event is attributed to.
///
/// Operational diagnostics always come from `System`, so a reader of the
/// event stream can tell agent content from failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    System,
    Orchestrator,
    QuestionAgent,
    /// 1-based participant number
    AnswerAgent(usize),
    Synthesizer,
}

impl Speaker {
    /// Speaker for the participant at zero-based `index`.
    pub fn participant(index: usize) -> Self {
        Speaker::AnswerAgent(index + 1)
    }

    pub fn is_agent(&self) -> bool {
        matches!(
            self,
            Speaker::QuestionAgent | Speaker::AnswerAgent(_) | Speaker::Synthesizer
        )
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::System => write!(f, "System"),
            Speaker::Orchestrator => write!(f, "Orchestrator"),
            Speaker::QuestionAgent => write!(f, "Question Agent"),
            Speaker::AnswerAgent(n) => write!(f, "Answer Agent {}", n),
            Speaker::Synthesizer => write!(f, "Synthesizer"),
        }
    }
}

/// Severity of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    Info,
    Warning,
    Error,
    /// The session stops after this event.
    Fatal,
}

impl EventLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventLevel::Info => "info",
            EventLevel::Warning => "warning",
            EventLevel::Error => "error",
            EventLevel::Fatal => "fatal",
        }
    }
}

/// One `(speaker, message)` step of a debate session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebateEvent {
    pub speaker: Speaker,
    pub message: String,
    pub level: EventLevel,
}

impl DebateEvent {
    pub fn new(speaker: Speaker, message: impl Into<String>, level: EventLevel) -> Self {
        Self {
            speaker,
            message: message.into(),
            level,
        }
    }

    pub fn info(speaker: Speaker, message: impl Into<String>) -> Self {
        Self::new(speaker, message, EventLevel::Info)
    }

    pub fn warning(speaker: Speaker, message: impl Into<String>) -> Self {
        Self::new(speaker, message, EventLevel::Warning)
    }

    /// A recoverable failure reported by the system.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Speaker::System, message, EventLevel::Error)
    }

    /// A failure that ends the session.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(Speaker::System, message, EventLevel::Fatal)
    }

    pub fn is_fatal(&self) -> bool {
        self.level == EventLevel::Fatal
    }
}

impl fmt::Display for DebateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.speaker, self.message)
    }
}
