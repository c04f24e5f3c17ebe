//! Question value object

use serde::{Deserialize, Serialize};

/// A question posed against a document (Value Object)
///
/// Questions are produced once per session by the question generator
/// and are identified only by their position in the generated list.
/// They are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if empty or whitespace.
    ///
    /// Surrounding whitespace is trimmed.
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == content.len() {
            Some(Self { content })
        } else {
            Some(Self {
                content: trimmed.to_string(),
            })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl AsRef<str> for Question {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("What was the revenue?").unwrap();
        assert_eq!(q.content(), "What was the revenue?");
    }

    #[test]
    fn test_question_is_trimmed() {
        let q = Question::try_new("  What was the revenue?\n").unwrap();
        assert_eq!(q.content(), "What was the revenue?");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Question::try_new("").is_none());
        assert!(Question::try_new("   ").is_none());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let q = Question::try_new("Why?").unwrap();
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"Why?\"");
    }
}
