//! Console formatting for debate events, question lists and follow-up reports

use colored::{ColoredString, Colorize};
use debate_domain::{
    DebateEvent, EventLevel, FollowUpRecord, FollowUpReport, FollowUpStatus, Question, Speaker,
};
use serde_json::json;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One event as `speaker: message`, colored by speaker and level.
    pub fn event(event: &DebateEvent) -> String {
        let message = match event.level {
            EventLevel::Info => event.message.normal(),
            EventLevel::Warning => event.message.yellow(),
            EventLevel::Error => event.message.red(),
            EventLevel::Fatal => event.message.red().bold(),
        };
        format!("{}: {}", Self::speaker(&event.speaker), message)
    }

    /// One event as a single JSON line.
    pub fn event_json(event: &DebateEvent) -> String {
        json!({
            "speaker": event.speaker.to_string(),
            "level": event.level.as_str(),
            "message": event.message,
        })
        .to_string()
    }

    fn speaker(speaker: &Speaker) -> ColoredString {
        let name = speaker.to_string();
        match speaker {
            Speaker::System => name.red().bold(),
            Speaker::Orchestrator => name.cyan().bold(),
            Speaker::QuestionAgent => name.magenta().bold(),
            Speaker::AnswerAgent(_) => name.yellow().bold(),
            Speaker::Synthesizer => name.green().bold(),
        }
    }

    /// Numbered question list.
    pub fn questions(questions: &[Question]) -> String {
        if questions.is_empty() {
            return format!("{}\n", "No questions were generated.".yellow());
        }
        questions
            .iter()
            .enumerate()
            .map(|(i, q)| format!("{} {}\n", format!("{}.", i + 1).bold(), q.content()))
            .collect()
    }

    pub fn questions_json(questions: &[Question]) -> String {
        let texts: Vec<&str> = questions.iter().map(Question::content).collect();
        serde_json::to_string_pretty(&texts).unwrap_or_else(|_| "[]".to_string())
    }

    /// Per-question follow-up report with a summary line.
    pub fn follow_up_report(report: &FollowUpReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Follow-up Results"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Questions from:".cyan().bold(),
            report.question_document
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Answers from:".cyan().bold(),
            report.answer_document
        ));

        if report.records.is_empty() {
            output.push_str(&format!("\n{}\n", "No questions were processed.".yellow()));
        }

        for (i, record) in report.records.iter().enumerate() {
            output.push_str(&Self::section_header(&format!("Question {}", i + 1)));
            output.push_str(&Self::follow_up_record(record));
        }

        output.push_str(&format!(
            "\n{} {} satisfied, {} unsatisfied, {} failed\n",
            "Summary:".cyan().bold(),
            report.count(FollowUpStatus::Satisfied),
            report.count(FollowUpStatus::Unsatisfied),
            report.count(FollowUpStatus::Error),
        ));
        if report.stopped_early {
            output.push_str(&format!(
                "{}\n",
                "Stopped before all questions were processed.".yellow()
            ));
        }
        output.push_str(&Self::footer());
        output
    }

    fn follow_up_record(record: &FollowUpRecord) -> String {
        let status = match record.status {
            FollowUpStatus::Satisfied => record.status.as_str().green().bold(),
            FollowUpStatus::Unsatisfied => record.status.as_str().yellow().bold(),
            FollowUpStatus::Error => record.status.as_str().red().bold(),
        };

        let mut output = format!("{} {}\n", "Q:".bold(), record.initial_question);
        output.push_str(&format!(
            "{} {} ({} follow-up{})\n",
            "Status:".bold(),
            status,
            record.follow_up_count(),
            if record.follow_up_count() == 1 { "" } else { "s" }
        ));

        for (n, attempt) in record.attempts.iter().enumerate().skip(1) {
            output.push_str(&format!(
                "  {} {}\n",
                format!("Follow-up {n}:").dimmed(),
                attempt.question
            ));
        }

        output.push_str(&format!(
            "{}\n{}\n",
            "Final answer:".bold(),
            Self::indent(&record.final_answer, "  ")
        ));
        if let Some(reason) = &record.reason {
            output.push_str(&format!("{} {}\n", "Reason:".bold(), reason));
        }
        output
    }

    pub fn follow_up_report_json(report: &FollowUpReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
