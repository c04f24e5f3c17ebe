//! Progress notification port
//!
//! Callbacks for the follow-up loop. Debate sessions report progress
//! through their event stream instead.

use debate_domain::{FollowUpRecord, QaAttempt, Question};

/// Callback for progress updates during a follow-up run
///
/// Implementations live in the presentation layer. Every method has a
/// no-op default.
pub trait FollowUpProgressNotifier: Send + Sync {
    /// Called once the initial questions are known
    fn on_questions_generated(&self, _questions: &[Question]) {}

    /// Called before an initial question (1-based `index`) is processed
    fn on_question_start(&self, _index: usize, _total: usize, _question: &Question) {}

    /// Called before the participant is asked (the initial question or a follow-up)
    fn on_asking(&self, _question: &str, _is_follow_up: bool) {}

    /// Called after each ask/judge cycle
    fn on_attempt(&self, _attempt: &QaAttempt) {}

    /// Called when a question reaches its final state
    fn on_question_complete(&self, _index: usize, _record: &FollowUpRecord) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoFollowUpProgress;

impl FollowUpProgressNotifier for NoFollowUpProgress {}
