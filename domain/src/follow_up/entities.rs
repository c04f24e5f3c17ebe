//! Entities of the satisfaction-driven follow-up loop

use serde::{Deserialize, Serialize};

/// Final state of one initial question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpStatus {
    Satisfied,
    Unsatisfied,
    Error,
}

impl FollowUpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpStatus::Satisfied => "Satisfied",
            FollowUpStatus::Unsatisfied => "Unsatisfied",
            FollowUpStatus::Error => "Error",
        }
    }
}

impl std::fmt::Display for FollowUpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why the loop stopped for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The judge accepted the latest answer.
    Satisfied,
    /// Unsatisfied, and no usable follow-up question was produced.
    NoFollowUp,
    /// Unsatisfied after `max_follow_ups` follow-ups.
    MaxAttempts,
    /// Answering failed.
    Failed,
}

/// One ask/judge cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaAttempt {
    pub question: String,
    pub answer: String,
    pub satisfied: bool,
    pub reason: Option<String>,
}

/// Outcome of one initial question, including every follow-up asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpRecord {
    pub initial_question: String,
    pub status: FollowUpStatus,
    pub stop_reason: StopReason,
    pub attempts: Vec<QaAttempt>,
    pub final_answer: String,
    pub reason: Option<String>,
}

impl FollowUpRecord {
    /// Record for a question whose processing failed.
    ///
    /// The error text is both the final answer and the reason.
    pub fn failed(
        initial_question: impl Into<String>,
        attempts: Vec<QaAttempt>,
        error_text: impl Into<String>,
    ) -> Self {
        let error_text = error_text.into();
        Self {
            initial_question: initial_question.into(),
            status: FollowUpStatus::Error,
            stop_reason: StopReason::Failed,
            attempts,
            final_answer: error_text.clone(),
            reason: Some(error_text),
        }
    }

    /// Build a record from the attempts made, judged by the last one.
    pub fn concluded(
        initial_question: impl Into<String>,
        attempts: Vec<QaAttempt>,
        stop_reason: StopReason,
    ) -> Self {
        let (final_answer, reason, satisfied) = attempts
            .last()
            .map(|a| (a.answer.clone(), a.reason.clone(), a.satisfied))
            .unwrap_or_default();

        Self {
            initial_question: initial_question.into(),
            status: if satisfied {
                FollowUpStatus::Satisfied
            } else {
                FollowUpStatus::Unsatisfied
            },
            stop_reason,
            attempts,
            final_answer,
            reason,
        }
    }

    /// Number of follow-up questions asked after the initial one.
    pub fn follow_up_count(&self) -> usize {
        self.attempts.len().saturating_sub(1)
    }
}

/// Results of a follow-up run across all generated questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpReport {
    pub question_document: String,
    pub answer_document: String,
    pub records: Vec<FollowUpRecord>,
    /// The operator declined to continue before every question was processed.
    pub stopped_early: bool,
}

impl FollowUpReport {
    pub fn count(&self, status: FollowUpStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(answer: &str, satisfied: bool) -> QaAttempt {
        QaAttempt {
            question: "Q".to_string(),
            answer: answer.to_string(),
            satisfied,
            reason: Some(format!("reason for {answer}")),
        }
    }

    #[test]
    fn test_concluded_uses_last_attempt() {
        let record = FollowUpRecord::concluded(
            "Q",
            vec![attempt("first", false), attempt("second", true)],
            StopReason::Satisfied,
        );
        assert_eq!(record.status, FollowUpStatus::Satisfied);
        assert_eq!(record.final_answer, "second");
        assert_eq!(record.follow_up_count(), 1);
    }

    #[test]
    fn test_failed_record() {
        let record = FollowUpRecord::failed("Q", vec![], "Error: Report content is empty.");
        assert_eq!(record.status, FollowUpStatus::Error);
        assert_eq!(record.final_answer, "Error: Report content is empty.");
        assert_eq!(record.reason.as_deref(), Some("Error: Report content is empty."));
        assert_eq!(record.follow_up_count(), 0);
    }

    #[test]
    fn test_report_counts_and_json() {
        let report = FollowUpReport {
            question_document: "q.md".into(),
            answer_document: "a.md".into(),
            records: vec![
                FollowUpRecord::concluded("Q", vec![attempt("a", false)], StopReason::MaxAttempts),
                FollowUpRecord::failed("Q2", vec![], "Error: boom"),
            ],
            stopped_early: false,
        };
        assert_eq!(report.count(FollowUpStatus::Unsatisfied), 1);
        assert_eq!(report.count(FollowUpStatus::Error), 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["records"][0]["stop_reason"], "max_attempts");
        assert_eq!(json["records"][1]["status"], "error");
    }
}
