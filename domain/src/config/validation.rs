//! Structured configuration issues.
//!
//! Loaders collect [`ConfigIssue`]s instead of failing on the first
//! problem. Callers print warnings and refuse to start on any
//! [`Severity::Error`].

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A model name is blank.
    EmptyModelName,
    /// `num_questions` is zero; no question would ever be asked.
    ZeroQuestions,
    /// A routing entry or the default provider names an unknown provider.
    UnknownProvider,
    /// `max_input_tokens` is zero; every prompt would be rejected.
    ZeroTokenLimit,
    /// Temperature outside the range most providers accept.
    TemperatureOutOfRange,
    /// The proxy URL cannot be parsed.
    InvalidProxy,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{label}: {}", self.message)
    }
}
