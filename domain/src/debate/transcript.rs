//! Markdown rendering of the debate transcript
//!
//! The transcript is append-only: one header written when the session
//! opens the file, then one section per question once that question's
//! synthesis has finished. These functions only build the text; writing
//! is the transcript sink's job.
//!
//! ```text
//! # Multi-Round Debate Log for annual.md
//! * Max Rounds: 2
//! * Answer Agents: 2
//!
//! ## Question:
//! What was the revenue?
//!
//! ### Debate History (4 entries):
//!
//!
//! #### Round 0:
//!
//! > **Answer Agent 1:**
//!
//! > Revenue was $10M.
//!
//! >
//! ...
//! ### Final Answer (Synthesized):
//! ...
//!
//! ---
//! ```

use super::config::DebateProtocol;
use super::history::DebateHistory;

/// Header written once when the transcript is opened.
pub fn render_header(protocol: &DebateProtocol, source_name: &str, participants: usize) -> String {
    match protocol {
        DebateProtocol::Panel => format!("# Multi-Agent Debate Log for {}\n\n", source_name),
        DebateProtocol::MultiRound { max_rounds } => format!(
            "# Multi-Round Debate Log for {}\n* Max Rounds: {}\n* Answer Agents: {}\n\n",
            source_name, max_rounds, participants
        ),
    }
}

/// Section for a panel question: the question and its final answer.
pub fn render_panel_section(question: &str, final_answer: &str) -> String {
    format!(
        "## Question:\n{}\n\n### Final Answer:\n{}\n\n---\n\n",
        question, final_answer
    )
}

/// Section for a multi-round question with its full history grouped by round.
pub fn render_debate_section(question: &str, history: &DebateHistory, final_answer: &str) -> String {
    let mut out = format!(
        "## Question:\n{}\n\n### Debate History ({} entries):\n\n",
        question,
        history.len()
    );

    if history.is_empty() {
        out.push_str("(No history recorded)\n\n");
    } else {
        for (round, entries) in history.by_round() {
            out.push_str(&format!("\n#### Round {}:\n\n", round));
            for entry in entries {
                out.push_str(&format!("> **{}:**\n\n", entry.participant));
                out.push_str(&quote(&entry.response));
                out.push_str("\n\n>\n\n");
            }
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "### Final Answer (Synthesized):\n{}\n\n---\n\n",
        final_answer
    ));
    out
}

fn quote(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::history::DebateHistoryEntry;

    #[test]
    fn test_multi_round_header() {
        let header = render_header(&DebateProtocol::MultiRound { max_rounds: 3 }, "annual.md", 2);
        assert_eq!(
            header,
            "# Multi-Round Debate Log for annual.md\n* Max Rounds: 3\n* Answer Agents: 2\n\n"
        );
    }

    #[test]
    fn test_panel_header_and_section() {
        assert_eq!(
            render_header(&DebateProtocol::Panel, "q.txt", 4),
            "# Multi-Agent Debate Log for q.txt\n\n"
        );
        assert_eq!(
            render_panel_section("Why?", "Because."),
            "## Question:\nWhy?\n\n### Final Answer:\nBecause.\n\n---\n\n"
        );
    }

    #[test]
    fn test_debate_section_quotes_each_line() {
        let mut history = DebateHistory::new();
        history
            .record(DebateHistoryEntry::new("Answer Agent 1", 0, "line one\nline two"))
            .unwrap();
        history
            .record(DebateHistoryEntry::new("Answer Agent 1", 1, "rebuttal"))
            .unwrap();

        let section = render_debate_section("Q?", &history, "Final.");
        let expected = "## Question:\nQ?\n\n### Debate History (2 entries):\n\n\
                        \n#### Round 0:\n\n> **Answer Agent 1:**\n\n> line one\n> line two\n\n>\n\n\
                        \n#### Round 1:\n\n> **Answer Agent 1:**\n\n> rebuttal\n\n>\n\n\
                        \n### Final Answer (Synthesized):\nFinal.\n\n---\n\n";
        assert_eq!(section, expected);
    }

    #[test]
    fn test_debate_section_without_history() {
        let section = render_debate_section("Q?", &DebateHistory::new(), "None.");
        assert!(section.contains("### Debate History (0 entries):\n\n(No history recorded)\n\n"));
        assert!(section.ends_with("### Final Answer (Synthesized):\nNone.\n\n---\n\n"));
    }
}
