//! Progress reporting for debate sessions and the follow-up loop

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use debate_application::FollowUpProgressNotifier;
use debate_domain::util::preview;
use debate_domain::{DebateEvent, FollowUpRecord, FollowUpStatus, QaAttempt, Question};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Prints debate events while a spinner shows the session is still working.
///
/// Lines are printed above the spinner so the two never interleave.
pub struct DebateProgress {
    spinner: Option<ProgressBar>,
}

impl DebateProgress {
    pub fn new(show_spinner: bool) -> Self {
        let spinner = show_spinner.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(spinner_style());
            pb.set_prefix("Debate");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        Self { spinner }
    }

    /// Print `line` for `event` and describe what the session does next.
    pub fn show(&self, event: &DebateEvent, line: &str) {
        match &self.spinner {
            Some(pb) => {
                pb.println(line);
                pb.set_message(format!("after {}", event.speaker));
            }
            None => println!("{line}"),
        }
    }

    pub fn finish(&self) {
        if let Some(pb) = &self.spinner {
            pb.finish_and_clear();
        }
    }
}

impl Drop for DebateProgress {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Spinner for a single blocking request, such as one chat answer.
pub struct RequestSpinner {
    bar: ProgressBar,
}

impl RequestSpinner {
    pub fn start(prefix: &str, message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.set_prefix(prefix.to_string());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }
}

impl Drop for RequestSpinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Follow-up loop progress with a spinner per question
pub struct FollowUpProgressReporter {
    question_bar: Mutex<Option<ProgressBar>>,
}

impl FollowUpProgressReporter {
    pub fn new() -> Self {
        Self {
            question_bar: Mutex::new(None),
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.question_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for FollowUpProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FollowUpProgressNotifier for FollowUpProgressReporter {
    fn on_questions_generated(&self, questions: &[Question]) {
        println!(
            "{} {}",
            "->".cyan(),
            format!("Generated {} initial questions", questions.len()).bold()
        );
    }

    fn on_question_start(&self, index: usize, total: usize, question: &Question) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(spinner_style());
        pb.set_prefix(format!("Question {}/{}", index + 1, total));
        pb.set_message(preview(question.content(), 60));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.question_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_asking(&self, question: &str, is_follow_up: bool) {
        let label = if is_follow_up { "Follow-up" } else { "Asking" };
        self.with_bar(|pb| pb.set_message(format!("{label}: {}", preview(question, 60))));
    }

    fn on_attempt(&self, attempt: &QaAttempt) {
        let mark = if attempt.satisfied {
            "v".green()
        } else {
            "x".yellow()
        };
        let line = format!("  {} {}", mark, preview(&attempt.answer, 70));
        self.with_bar(|pb| pb.println(&line));
    }

    fn on_question_complete(&self, _index: usize, record: &FollowUpRecord) {
        let taken = self.question_bar.lock().ok().and_then(|mut guard| guard.take());
        if let Some(pb) = taken {
            let status = match record.status {
                FollowUpStatus::Satisfied => record.status.as_str().green(),
                FollowUpStatus::Unsatisfied => record.status.as_str().yellow(),
                FollowUpStatus::Error => record.status.as_str().red(),
            };
            pb.finish_with_message(format!("{status}"));
        }
    }
}

/// Plain line-based follow-up progress (no spinners)
pub struct SimpleFollowUpProgress;

impl FollowUpProgressNotifier for SimpleFollowUpProgress {
    fn on_questions_generated(&self, questions: &[Question]) {
        println!("Generated {} initial questions:", questions.len());
        print!("{}", ConsoleFormatter::questions(questions));
    }

    fn on_question_start(&self, index: usize, total: usize, question: &Question) {
        println!("\n--- Processing Initial Question {}/{} ---", index + 1, total);
        println!("Q: {}", question.content());
    }

    fn on_asking(&self, question: &str, is_follow_up: bool) {
        if is_follow_up {
            println!("  Generated Follow-up: {question}");
        }
    }

    fn on_attempt(&self, attempt: &QaAttempt) {
        println!("  Answer: {}", attempt.answer);
        println!(
            "  Satisfied: {}{}",
            if attempt.satisfied { "Yes" } else { "No" },
            attempt
                .reason
                .as_deref()
                .map(|r| format!(" ({r})"))
                .unwrap_or_default()
        );
    }

    fn on_question_complete(&self, _index: usize, record: &FollowUpRecord) {
        println!("  Result: {}", record.status);
    }
}
