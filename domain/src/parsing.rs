//! Parsing of free-form LLM replies.
//!
//! These functions extract structure from plain text with regular
//! expressions. They are heuristics, not grammars: malformed replies
//! degrade to "nothing found" rather than an error.
//!
//! # Functions
//!
//! | Function | Used by | Looks for |
//! |----------|---------|-----------|
//! | [`parse_question_list`] | Question generation | One question per line, list markers stripped |
//! | [`parse_structured_reply`] | Satisfaction judge | `Assessment: Satisfied\|Unsatisfied`, `Reason: ...` |
//! | [`parse_follow_up`] | Follow-up generation | `Follow-up Question: ...` |

use regex::Regex;
use std::sync::LazyLock;

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+[.)]\s*|^\s*[-*+]\s*").expect("LIST_MARKER regex should compile")
});

static ASSESSMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Assessment:\s*(Satisfied|Unsatisfied)")
        .expect("ASSESSMENT regex should compile")
});

static REASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Reason:\s*(.*)").expect("REASON regex should compile")
});

static FOLLOW_UP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Follow-up Question:\s*(.*)").expect("FOLLOW_UP regex should compile")
});

/// Remove leading list markers (`1.`, `1)`, `-`, `*`, `+`) and surrounding whitespace.
///
/// Markers are stripped until none remain, so stripping is idempotent:
/// `strip_list_marker(strip_list_marker(x)) == strip_list_marker(x)`.
pub fn strip_list_marker(line: &str) -> &str {
    let mut current = line.trim();
    while let Some(m) = LIST_MARKER.find(current) {
        if m.is_empty() {
            break;
        }
        current = current[m.end()..].trim();
    }
    current
}

/// Split raw generator output into questions.
///
/// Each line has its list marker stripped; blank lines are dropped. When
/// nothing survives but the output had text, the whole trimmed output is
/// returned as a single question so that no reply is silently lost.
///
/// Prose without markers is not cleaned beyond that; callers may receive
/// noisy lines.
pub fn parse_question_list(raw: &str) -> Vec<String> {
    let questions: Vec<String> = raw
        .lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if questions.is_empty() && !raw.trim().is_empty() {
        return vec![raw.trim().to_string()];
    }
    questions
}

/// Verdict of the satisfaction judge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Satisfied,
    Unsatisfied,
}

/// What could be read out of a judge reply
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedAssessment {
    pub verdict: Option<Verdict>,
    pub reason: Option<String>,
}

impl ParsedAssessment {
    /// Only an explicit `Satisfied` verdict counts; anything else is unsatisfied.
    pub fn is_satisfied(&self) -> bool {
        self.verdict == Some(Verdict::Satisfied)
    }
}

/// Parse `Assessment:` and `Reason:` out of a judge reply.
///
/// The verdict match is case-insensitive. The reason is everything after
/// `Reason:`, across newlines, trimmed; an empty reason is absent.
pub fn parse_structured_reply(text: &str) -> ParsedAssessment {
    let verdict = ASSESSMENT.captures(text).and_then(|c| c.get(1)).map(|m| {
        if m.as_str().eq_ignore_ascii_case("satisfied") {
            Verdict::Satisfied
        } else {
            Verdict::Unsatisfied
        }
    });

    let reason = REASON
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|r| !r.is_empty());

    ParsedAssessment { verdict, reason }
}

/// Extract a follow-up question from a generator reply.
///
/// Takes the text after `Follow-up Question:` (case-insensitive, across
/// newlines), or the whole reply when the marker is missing. Returns
/// `None` when that text is empty or identical to `original_question`.
pub fn parse_follow_up(text: &str, original_question: &str) -> Option<String> {
    let extracted = FOLLOW_UP
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
        .trim();

    if extracted.is_empty() || extracted == original_question.trim() {
        return None;
    }
    Some(extracted.to_string())
}
