//! Run Follow-Up use case.
//!
//! One participant answers each generated question. Every answer is judged
//! against the original question; an unsatisfactory answer triggers a
//! refined follow-up question, up to `max_follow_ups` times.
//!
//! ```text
//! Ask ──▶ Judge ──satisfied──▶ Done
//!  ▲        │
//!  │        └─unsatisfied─▶ attempts left? ──no──▶ Done (max attempts)
//!  │                              │
//!  │                             yes
//!  │                              ▼
//!  └──────── follow-up ◀── GenerateFollowUp ──none──▶ Done (no follow-up)
//! ```

use crate::agents::{
    AgentError, AnswerParticipant, FollowUpGenerator, QuestionGenerator, SatisfactionJudge,
};
use crate::ports::continue_prompt::{AlwaysContinue, ContinuePrompt};
use crate::ports::document_loader::{DocumentError, DocumentLoader};
use crate::ports::progress::{FollowUpProgressNotifier, NoFollowUpProgress};
use debate_domain::{
    FollowUpRecord, FollowUpReport, QaAttempt, Question, StopReason, display_name,
};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop a follow-up run before any question is processed.
#[derive(Error, Debug)]
pub enum RunFollowUpError {
    #[error("Failed to load question document: {0}")]
    QuestionDocument(#[source] DocumentError),

    #[error("Failed to load answer document: {0}")]
    AnswerDocument(#[source] DocumentError),

    #[error("Failed to generate initial questions: {0}")]
    QuestionGeneration(#[from] AgentError),
}

/// Input for the [`RunFollowUpUseCase`].
#[derive(Debug, Clone)]
pub struct RunFollowUpInput {
    pub question_document: PathBuf,
    pub answer_document: PathBuf,
    pub num_questions: usize,
    /// Follow-up questions allowed per initial question; 0 asks each question once.
    pub max_follow_ups: usize,
}

impl RunFollowUpInput {
    pub fn new(question_document: impl Into<PathBuf>, answer_document: impl Into<PathBuf>) -> Self {
        Self {
            question_document: question_document.into(),
            answer_document: answer_document.into(),
            num_questions: debate_domain::DEFAULT_NUM_QUESTIONS,
            max_follow_ups: 2,
        }
    }

    pub fn with_num_questions(mut self, num_questions: usize) -> Self {
        self.num_questions = num_questions;
        self
    }

    pub fn with_max_follow_ups(mut self, max_follow_ups: usize) -> Self {
        self.max_follow_ups = max_follow_ups;
        self
    }
}

/// Agents taking part in a follow-up run
pub struct FollowUpAgents {
    pub question_generator: QuestionGenerator,
    pub participant: AnswerParticipant,
    pub judge: SatisfactionJudge,
    pub follow_up_generator: FollowUpGenerator,
}

/// Use case for the satisfaction-driven follow-up loop.
pub struct RunFollowUpUseCase {
    loader: Arc<dyn DocumentLoader>,
    agents: FollowUpAgents,
    continue_prompt: Arc<dyn ContinuePrompt>,
}

impl RunFollowUpUseCase {
    pub fn new(loader: Arc<dyn DocumentLoader>, agents: FollowUpAgents) -> Self {
        Self {
            loader,
            agents,
            continue_prompt: Arc::new(AlwaysContinue),
        }
    }

    /// Ask the operator before each question after the first.
    pub fn with_continue_prompt(mut self, prompt: Arc<dyn ContinuePrompt>) -> Self {
        self.continue_prompt = prompt;
        self
    }

    pub async fn execute(&self, input: RunFollowUpInput) -> Result<FollowUpReport, RunFollowUpError> {
        self.execute_with_progress(input, &NoFollowUpProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: RunFollowUpInput,
        progress: &dyn FollowUpProgressNotifier,
    ) -> Result<FollowUpReport, RunFollowUpError> {
        info!(
            "Starting follow-up run: {} questions from {}, answers from {}",
            input.num_questions,
            input.question_document.display(),
            input.answer_document.display()
        );

        let source = self
            .loader
            .read(&input.question_document)
            .map_err(RunFollowUpError::QuestionDocument)?;
        let answers = self
            .loader
            .read(&input.answer_document)
            .map_err(RunFollowUpError::AnswerDocument)?;

        let questions = self
            .agents
            .question_generator
            .generate(&source, input.num_questions)
            .await?;
        progress.on_questions_generated(&questions);

        let mut report = FollowUpReport {
            question_document: display_name(&input.question_document),
            answer_document: display_name(&input.answer_document),
            ..Default::default()
        };

        if questions.is_empty() {
            warn!("No initial questions were generated");
            return Ok(report);
        }

        let total = questions.len();
        for (i, question) in questions.iter().enumerate() {
            if i > 0 && !self.continue_prompt.should_continue(i + 1, total).await {
                info!("Operator stopped after {} of {} questions", i, total);
                report.stopped_early = true;
                break;
            }

            progress.on_question_start(i + 1, total, question);
            let record = self
                .process_question(question, &answers, input.max_follow_ups, progress)
                .await;
            progress.on_question_complete(i + 1, &record);
            report.records.push(record);
        }

        Ok(report)
    }

    async fn process_question(
        &self,
        original: &Question,
        document: &str,
        max_follow_ups: usize,
        progress: &dyn FollowUpProgressNotifier,
    ) -> FollowUpRecord {
        let mut attempts: Vec<QaAttempt> = Vec::new();
        let mut current = original.content().to_string();

        loop {
            progress.on_asking(&current, !attempts.is_empty());

            let answer = match self
                .agents
                .participant
                .answer_initial(&current, document)
                .await
            {
                Ok(answer) => answer,
                Err(e) => {
                    warn!("Answering failed: {e}");
                    return FollowUpRecord::failed(original.content(), attempts, e.to_answer_text());
                }
            };

            // Judged against the original question, whatever was asked this time.
            let assessment = self.agents.judge.judge(original.content(), &answer).await;
            let attempt = QaAttempt {
                question: current.clone(),
                answer,
                satisfied: assessment.satisfied,
                reason: assessment.reason,
            };
            progress.on_attempt(&attempt);
            attempts.push(attempt);

            if assessment.satisfied {
                return FollowUpRecord::concluded(original.content(), attempts, StopReason::Satisfied);
            }

            let follow_ups_asked = attempts.len() - 1;
            if follow_ups_asked >= max_follow_ups {
                debug!("Follow-up limit of {} reached", max_follow_ups);
                return FollowUpRecord::concluded(original.content(), attempts, StopReason::MaxAttempts);
            }

            let latest = attempts
                .last()
                .map(|a| a.answer.as_str())
                .unwrap_or_default();
            match self
                .agents
                .follow_up_generator
                .generate_follow_up(original.content(), latest)
                .await
            {
                Some(follow_up) => current = follow_up.content().to_string(),
                None => {
                    return FollowUpRecord::concluded(
                        original.content(),
                        attempts,
                        StopReason::NoFollowUp,
                    );
                }
            }
        }
    }
}
