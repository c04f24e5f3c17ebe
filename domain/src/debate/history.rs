//! Append-only debate history for a single question

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rendering used when nothing has been said yet.
pub const EMPTY_HISTORY_TEXT: &str = "No debate history yet.";

/// One contribution to a debate.
///
/// Round 0 is a participant's independent answer; rounds >= 1 are made
/// with visibility into every earlier entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateHistoryEntry {
    pub participant: String,
    pub round: u32,
    pub response: String,
}

impl DebateHistoryEntry {
    pub fn new(participant: impl Into<String>, round: u32, response: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            round,
            response: response.into(),
        }
    }
}

/// Ordered history of a question's debate.
///
/// Insertion order is causal order: round numbers never decrease going
/// forward through the entries. The history lives for one question and is
/// discarded once that question's section has been written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateHistory {
    entries: Vec<DebateHistoryEntry>,
}

impl DebateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, rejecting one that would go back to an earlier round.
    pub fn record(&mut self, entry: DebateHistoryEntry) -> Result<(), DomainError> {
        if let Some(last) = self.last_round()
            && entry.round < last
        {
            return Err(DomainError::HistoryOutOfOrder {
                last,
                attempted: entry.round,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[DebateHistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_round(&self) -> Option<u32> {
        self.entries.last().map(|e| e.round)
    }

    /// Entries grouped by round, rounds ascending, insertion order within a round.
    pub fn by_round(&self) -> BTreeMap<u32, Vec<&DebateHistoryEntry>> {
        let mut rounds: BTreeMap<u32, Vec<&DebateHistoryEntry>> = BTreeMap::new();
        for entry in &self.entries {
            rounds.entry(entry.round).or_default().push(entry);
        }
        rounds
    }

    /// Responses recorded in `round`, in participant order.
    pub fn responses_in_round(&self, round: u32) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.round == round)
            .map(|e| e.response.as_str())
            .collect()
    }

    /// Text form embedded into debate and synthesis prompts.
    ///
    /// Each entry becomes `Round {n} - {participant}:\n{text}\n---\n`; the
    /// concatenation is trimmed.
    pub fn render_for_prompt(&self) -> String {
        if self.entries.is_empty() {
            return EMPTY_HISTORY_TEXT.to_string();
        }

        let mut rendered = String::new();
        for entry in &self.entries {
            rendered.push_str(&format!(
                "Round {} - {}:\n{}\n---\n",
                entry.round, entry.participant, entry.response
            ));
        }
        rendered.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DebateHistory {
        let mut history = DebateHistory::new();
        history
            .record(DebateHistoryEntry::new("Answer Agent 1", 0, "Revenue was $10M."))
            .unwrap();
        history
            .record(DebateHistoryEntry::new("Answer Agent 2", 0, "Revenue is not stated."))
            .unwrap();
        history
            .record(DebateHistoryEntry::new("Answer Agent 1", 1, "My report says $10M."))
            .unwrap();
        history
    }

    #[test]
    fn test_empty_history_placeholder() {
        assert_eq!(DebateHistory::new().render_for_prompt(), "No debate history yet.");
    }

    #[test]
    fn test_render_for_prompt() {
        let rendered = sample().render_for_prompt();
        assert_eq!(
            rendered,
            "Round 0 - Answer Agent 1:\nRevenue was $10M.\n---\n\
             Round 0 - Answer Agent 2:\nRevenue is not stated.\n---\n\
             Round 1 - Answer Agent 1:\nMy report says $10M.\n---"
        );
    }

    #[test]
    fn test_rejects_earlier_round() {
        let mut history = sample();
        let result = history.record(DebateHistoryEntry::new("Answer Agent 2", 0, "late"));
        assert!(result.is_err());
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_rounds_never_decrease() {
        let history = sample();
        let rounds: Vec<u32> = history.entries().iter().map(|e| e.round).collect();
        assert!(rounds.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_by_round_grouping() {
        let history = sample();
        let grouped = history.by_round();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&0].len(), 2);
        assert_eq!(grouped[&0][1].participant, "Answer Agent 2");
        assert_eq!(grouped[&1].len(), 1);
    }

    #[test]
    fn test_responses_in_round() {
        assert_eq!(
            sample().responses_in_round(0),
            vec!["Revenue was $10M.", "Revenue is not stated."]
        );
        assert!(sample().responses_in_round(5).is_empty());
    }
}
