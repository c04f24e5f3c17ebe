//! Debate session
//!
//! Drives N answer participants through a panel or a multi-round debate
//! over questions generated from a source document, one step at a time.
//!
//! # Flow
//!
//! ```text
//! Start ──(participant/document mismatch)──▶ fatal, Done
//!   │
//! GenerateQuestions ──(none / failure)──▶ Done (transcript untouched)
//!   │
//! OpenTranscript ──(write failure)──▶ fatal, Done
//!   │
//!   ├─▶ BeginQuestion ─▶ Round 0: Ask/Answer × N
//!   │                     │
//!   │                     ├─ panel ───────────────┐
//!   │                     ▼                       ▼
//!   │       Round 1..R: Poll/Contribute × N ─▶ Synthesize ─▶ WriteSection
//!   │                                                          │
//!   └──────────────────────── next question ◀─────────────────┘
//!   │
//! Finish ─▶ Done
//! ```
//!
//! The session is pulled with [`DebateSession::next_event`]. Work only
//! happens inside that call, so the driver controls pacing and no two
//! model calls or file writes overlap. An announcement such as
//! `"Asking Answer Agent 1 ..."` is returned before the call it announces
//! is made.
//!
//! Failures of one participant in one round become a synthetic error
//! entry in the history; the question and the session go on.

use crate::agents::{AgentError, AnswerParticipant, QuestionGenerator, Synthesizer};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::document_loader::{DocumentError, DocumentLoader};
use crate::ports::transcript::TranscriptSink;
use debate_domain::debate::transcript::{render_debate_section, render_header, render_panel_section};
use debate_domain::{
    DebateEvent, DebateHistory, DebateHistoryEntry, DebateProtocol, Document, DomainError,
    EventLevel, Question, SessionConfig, Speaker, display_name,
};
use futures::Stream;
use serde::Serialize;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Final answer recorded when synthesis fails.
pub const SYNTHESIS_FAILED_TEXT: &str = "Error: Failed to synthesize final answer.";

/// Final answer recorded when no panel participant produced an answer.
pub const NO_VALID_ANSWERS_TEXT: &str = "Error: No valid answers obtained from agents.";

/// History text for a participant whose document is empty in a debate round.
pub const EMPTY_DOCUMENT_ENTRY_TEXT: &str = "Error: Agent document was empty.";

const SEPARATOR: &str = "-------------------------------------------";

/// Agents taking part in a session
pub struct DebateAgents {
    pub question_generator: QuestionGenerator,
    /// Bound by position to `SessionConfig::answer_documents`.
    pub participants: Vec<AnswerParticipant>,
    pub synthesizer: Synthesizer,
}

/// Problems that make a session pointless to start
#[derive(Error, Debug)]
pub enum DebateSetupError {
    #[error(transparent)]
    Config(#[from] DomainError),

    #[error("Question document unusable: {0}")]
    QuestionDocument(#[source] DocumentError),

    #[error("Document for Answer Agent {index} unusable: {source}")]
    AnswerDocument {
        index: usize,
        #[source]
        source: DocumentError,
    },
}

/// Check counts and that every document is readable, without calling a model.
///
/// The session performs the same count check itself; this lets a driver
/// refuse to start instead of reporting a fatal event.
pub fn verify_setup(
    config: &SessionConfig,
    participants: usize,
    loader: &dyn DocumentLoader,
) -> Result<(), DebateSetupError> {
    config.check_participants(participants)?;
    config.validate()?;
    loader
        .read(&config.question_document)
        .map_err(DebateSetupError::QuestionDocument)?;
    for (i, path) in config.answer_documents.iter().enumerate() {
        loader
            .read(path)
            .map_err(|source| DebateSetupError::AnswerDocument {
                index: i + 1,
                source,
            })?;
    }
    Ok(())
}

/// What happened to one question
#[derive(Debug, Clone, Serialize)]
pub struct QuestionOutcome {
    pub question: String,
    pub history: Vec<DebateHistoryEntry>,
    pub final_answer: String,
    /// Whether the section reached the transcript.
    pub written: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Start,
    AnnounceQuestions,
    GenerateQuestions,
    OpenTranscript,
    BeginQuestion,
    AskInitial { participant: usize },
    AnswerInitial { participant: usize },
    BeginRound { round: u32 },
    Poll { round: u32, participant: usize },
    Contribute { round: u32, participant: usize },
    AnnounceSynthesis,
    Synthesize,
    WriteSection { final_answer: String },
    Finish,
    /// A step was dropped before it completed.
    Interrupted,
    Done,
}

/// A pull-based debate over one question document.
pub struct DebateSession {
    config: SessionConfig,
    agents: DebateAgents,
    loader: Arc<dyn DocumentLoader>,
    transcript: Box<dyn TranscriptSink>,
    conversation_logger: Arc<dyn ConversationLogger>,

    stage: Stage,
    outbox: VecDeque<DebateEvent>,
    aborted: bool,

    questions: Vec<Question>,
    current: usize,
    history: DebateHistory,
    /// Round-0 successes for the current question (panel protocol).
    answered: usize,
    /// Participant documents, read on first use.
    documents: Vec<Option<Result<Arc<Document>, DocumentError>>>,
    outcomes: Vec<QuestionOutcome>,
}

impl DebateSession {
    pub fn new(
        config: SessionConfig,
        agents: DebateAgents,
        loader: Arc<dyn DocumentLoader>,
        transcript: Box<dyn TranscriptSink>,
    ) -> Self {
        let documents = vec![None; config.answer_documents.len()];
        Self {
            config,
            agents,
            loader,
            transcript,
            conversation_logger: Arc::new(NoConversationLogger),
            stage: Stage::Start,
            outbox: VecDeque::new(),
            aborted: false,
            questions: Vec::new(),
            current: 0,
            history: DebateHistory::new(),
            answered: 0,
            documents,
            outcomes: Vec::new(),
        }
    }

    /// Create with a conversation logger; every emitted event is logged.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Next step of the session, or `None` once it has finished.
    ///
    /// Dropping the returned future while a model request is in flight
    /// aborts the session: the next call yields a fatal event.
    pub async fn next_event(&mut self) -> Option<DebateEvent> {
        while self.outbox.is_empty() && self.stage != Stage::Done {
            self.step().await;
        }

        let event = self.outbox.pop_front()?;
        self.conversation_logger.log(ConversationEvent::new(
            "debate_event",
            serde_json::json!({
                "speaker": event.speaker.to_string(),
                "level": event.level.as_str(),
                "message": event.message,
            }),
        ));
        Some(event)
    }

    /// The session as a stream of events.
    pub fn into_stream(self) -> impl Stream<Item = DebateEvent> + Send {
        futures::stream::unfold(self, |mut session| async move {
            session.next_event().await.map(|event| (event, session))
        })
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Done && self.outbox.is_empty()
    }

    /// Whether the session stopped on a fatal event.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions processed so far, in order.
    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ==================== State machine ====================

    async fn step(&mut self) {
        let stage = std::mem::replace(&mut self.stage, Stage::Interrupted);
        debug!("Debate stage: {:?}", stage);
        self.stage = match stage {
            Stage::Start => self.start(),
            Stage::AnnounceQuestions => self.announce_questions(),
            Stage::GenerateQuestions => self.generate_questions().await,
            Stage::OpenTranscript => self.open_transcript(),
            Stage::BeginQuestion => self.begin_question(),
            Stage::AskInitial { participant } => self.ask_initial(participant),
            Stage::AnswerInitial { participant } => self.answer_initial(participant).await,
            Stage::BeginRound { round } => self.begin_round(round),
            Stage::Poll { round, participant } => self.poll(round, participant),
            Stage::Contribute { round, participant } => self.contribute(round, participant).await,
            Stage::AnnounceSynthesis => self.announce_synthesis(),
            Stage::Synthesize => self.synthesize().await,
            Stage::WriteSection { final_answer } => self.write_section(final_answer),
            Stage::Finish => self.finish(),
            Stage::Interrupted => {
                self.abort("Debate session interrupted during a model request".to_string())
            }
            Stage::Done => Stage::Done,
        };
    }

    fn start(&mut self) -> Stage {
        let source = display_name(&self.config.question_document);
        let start = match self.config.protocol {
            DebateProtocol::Panel => format!("Starting panel debate for document: {source}"),
            DebateProtocol::MultiRound { .. } => {
                format!("Starting multi-round debate for document: {source}")
            }
        };
        info!("{start}");
        self.emit(DebateEvent::info(Speaker::System, start));

        let checked = self
            .config
            .check_participants(self.agents.participants.len())
            .and_then(|_| self.config.validate());
        if let Err(e) = checked {
            return self.abort(format!("Error: {e}"));
        }
        Stage::AnnounceQuestions
    }

    fn announce_questions(&mut self) -> Stage {
        self.emit(DebateEvent::info(
            Speaker::Orchestrator,
            format!(
                "Generating {} initial questions from {}...",
                self.config.num_questions,
                display_name(&self.config.question_document)
            ),
        ));
        Stage::GenerateQuestions
    }

    async fn generate_questions(&mut self) -> Stage {
        let generated = match self.loader.read(&self.config.question_document) {
            Ok(content) => {
                self.agents
                    .question_generator
                    .generate(&content, self.config.num_questions)
                    .await
            }
            Err(e) => Err(AgentError::from(e)),
        };

        let questions = match generated {
            Ok(questions) => questions,
            Err(e) => return self.abort(format!("Error generating initial questions: {e}")),
        };

        if questions.is_empty() {
            warn!("Question generation returned no questions");
            self.emit(DebateEvent::warning(
                Speaker::QuestionAgent,
                "Warning: No initial questions were generated.",
            ));
            self.emit(DebateEvent::warning(
                Speaker::System,
                "No initial questions generated. Stopping workflow.",
            ));
            return Stage::Done;
        }

        self.emit(DebateEvent::info(
            Speaker::QuestionAgent,
            format!("Generated {} initial questions:", questions.len()),
        ));
        for (i, question) in questions.iter().enumerate() {
            self.emit(DebateEvent::info(
                Speaker::QuestionAgent,
                format!("Question {}: {}", i + 1, question),
            ));
        }
        self.questions = questions;
        Stage::OpenTranscript
    }

    fn open_transcript(&mut self) -> Stage {
        let header = render_header(
            &self.config.protocol,
            &display_name(&self.config.question_document),
            self.agents.participants.len(),
        );
        let output = self.config.output_path.display().to_string();

        match self.transcript.start(&header) {
            Ok(()) => {
                self.emit(DebateEvent::info(
                    Speaker::System,
                    format!("Initialized output log file: {output}"),
                ));
                Stage::BeginQuestion
            }
            Err(e) => self.abort(format!(
                "Error creating/accessing output file {output}: {e}. Cannot save results. Stopping workflow."
            )),
        }
    }

    fn begin_question(&mut self) -> Stage {
        let Some(question) = self.questions.get(self.current).cloned() else {
            return Stage::Finish;
        };

        self.history = DebateHistory::new();
        self.answered = 0;

        self.emit(DebateEvent::info(
            Speaker::Orchestrator,
            format!(
                "--- Processing Question {}/{} ---",
                self.current + 1,
                self.questions.len()
            ),
        ));
        self.emit(DebateEvent::info(Speaker::QuestionAgent, question.content()));
        if self.config.protocol.is_multi_round() {
            self.emit(DebateEvent::info(
                Speaker::Orchestrator,
                "--- Round 0: Gathering Initial Answers ---",
            ));
        }
        Stage::AskInitial { participant: 0 }
    }

    fn ask_initial(&mut self, participant: usize) -> Stage {
        if participant >= self.agents.participants.len() {
            return match self.config.protocol {
                DebateProtocol::Panel => Stage::AnnounceSynthesis,
                DebateProtocol::MultiRound { .. } => Stage::BeginRound { round: 1 },
            };
        }

        self.emit(DebateEvent::info(
            Speaker::Orchestrator,
            format!(
                "Asking {} (using {})...",
                Speaker::participant(participant),
                self.document_name(participant)
            ),
        ));
        Stage::AnswerInitial { participant }
    }

    async fn answer_initial(&mut self, participant: usize) -> Stage {
        let speaker = Speaker::participant(participant);
        let question = self.current_question();

        let result = match self.document(participant) {
            Ok(document) => {
                self.agents.participants[participant]
                    .answer_initial(&question, document.content())
                    .await
            }
            Err(e) => Err(AgentError::from(e)),
        };

        let entry_text = match result {
            Ok(answer) => {
                self.answered += 1;
                let message = match self.config.protocol {
                    DebateProtocol::Panel => answer.clone(),
                    DebateProtocol::MultiRound { .. } => format!("Initial Answer (R0): {answer}"),
                };
                self.emit(DebateEvent::info(speaker, message));
                answer
            }
            Err(e) => self.initial_failure(participant, &e),
        };

        self.record(speaker, 0, entry_text);
        Stage::AskInitial {
            participant: participant + 1,
        }
    }

    fn begin_round(&mut self, round: u32) -> Stage {
        let max_rounds = self.config.protocol.max_rounds();
        if round > max_rounds {
            return Stage::AnnounceSynthesis;
        }

        self.emit(DebateEvent::info(
            Speaker::Orchestrator,
            format!("--- Starting Debate Round {round}/{max_rounds} ---"),
        ));
        Stage::Poll {
            round,
            participant: 0,
        }
    }

    fn poll(&mut self, round: u32, participant: usize) -> Stage {
        if participant >= self.agents.participants.len() {
            return Stage::BeginRound { round: round + 1 };
        }

        self.emit(DebateEvent::info(
            Speaker::Orchestrator,
            format!(
                "Polling {} (using {}) for Round {}...",
                Speaker::participant(participant),
                self.document_name(participant),
                round
            ),
        ));
        Stage::Contribute { round, participant }
    }

    async fn contribute(&mut self, round: u32, participant: usize) -> Stage {
        let speaker = Speaker::participant(participant);
        let question = self.current_question();
        let next = Stage::Poll {
            round,
            participant: participant + 1,
        };

        let result = match self.document(participant) {
            Ok(document) if document.is_empty() => {
                let message = format!(
                    "Warning: Document file for {} ({}) is empty for round {}. Skipping participation.",
                    speaker,
                    self.document_name(participant),
                    round
                );
                warn!("{message}");
                self.emit(DebateEvent::warning(Speaker::System, message));
                self.record(speaker, round, EMPTY_DOCUMENT_ENTRY_TEXT.to_string());
                return next;
            }
            Ok(document) => {
                self.agents.participants[participant]
                    .participate(&question, &self.history, document.content(), round)
                    .await
            }
            Err(e) => Err(AgentError::from(e)),
        };

        let entry_text = match result {
            Ok(response) => {
                self.emit(DebateEvent::info(speaker, format!("Round {round}: {response}")));
                response
            }
            Err(e) => self.round_failure(participant, round, &e),
        };

        self.record(speaker, round, entry_text);
        next
    }

    fn announce_synthesis(&mut self) -> Stage {
        let number = self.current + 1;
        match self.config.protocol {
            DebateProtocol::Panel if self.answered == 0 => {
                self.emit(DebateEvent::warning(
                    Speaker::Orchestrator,
                    "No valid answers received from any agent for this question. Skipping synthesis.",
                ));
                Stage::WriteSection {
                    final_answer: NO_VALID_ANSWERS_TEXT.to_string(),
                }
            }
            DebateProtocol::Panel => {
                self.emit(DebateEvent::info(
                    Speaker::Orchestrator,
                    format!("Synthesizing final answer for Question {number}..."),
                ));
                Stage::Synthesize
            }
            DebateProtocol::MultiRound { .. } => {
                self.emit(DebateEvent::info(
                    Speaker::Orchestrator,
                    format!("--- Synthesizing Final Answer for Question {number} ---"),
                ));
                Stage::Synthesize
            }
        }
    }

    async fn synthesize(&mut self) -> Stage {
        let question = self.current_question();
        let result = match self.config.protocol {
            DebateProtocol::Panel => {
                let answers: Vec<String> = self
                    .history
                    .responses_in_round(0)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                self.agents
                    .synthesizer
                    .synthesize_answers(&question, &answers)
                    .await
            }
            DebateProtocol::MultiRound { .. } => {
                self.agents
                    .synthesizer
                    .synthesize_history(&question, &self.history)
                    .await
            }
        };

        let final_answer = match result {
            Ok(answer) => {
                self.emit(DebateEvent::info(Speaker::Synthesizer, answer.clone()));
                answer
            }
            Err(e) => {
                let message = match self.config.protocol {
                    DebateProtocol::Panel => format!("Error during final answer synthesis: {e}"),
                    DebateProtocol::MultiRound { .. } => format!("Error during final synthesis: {e}"),
                };
                error!("{message}");
                self.emit(DebateEvent::error(message));
                SYNTHESIS_FAILED_TEXT.to_string()
            }
        };
        Stage::WriteSection { final_answer }
    }

    fn write_section(&mut self, final_answer: String) -> Stage {
        let number = self.current + 1;
        let question = self.current_question();
        let section = match self.config.protocol {
            DebateProtocol::Panel => render_panel_section(&question, &final_answer),
            DebateProtocol::MultiRound { .. } => {
                render_debate_section(&question, &self.history, &final_answer)
            }
        };

        let written = match self.transcript.append(&section) {
            Ok(()) => {
                self.emit(DebateEvent::info(
                    Speaker::System,
                    format!("Results for Question {number} written to output file."),
                ));
                true
            }
            Err(e) => {
                let message =
                    format!("Error writing results for Question {number} to output file: {e}");
                error!("{message}");
                self.emit(DebateEvent::error(message));
                false
            }
        };

        self.outcomes.push(QuestionOutcome {
            question,
            history: self.history.entries().to_vec(),
            final_answer,
            written,
        });

        self.current += 1;
        if self.current < self.questions.len() {
            self.emit(DebateEvent::info(Speaker::System, SEPARATOR));
        }
        Stage::BeginQuestion
    }

    fn finish(&mut self) -> Stage {
        let output = self.config.output_path.display();
        let message = match self.config.protocol {
            DebateProtocol::Panel => format!("Debate interaction finished. Results saved to {output}"),
            DebateProtocol::MultiRound { .. } => {
                format!("Multi-round debate complete. Results saved to {output}")
            }
        };
        info!("{message}");
        self.emit(DebateEvent::info(Speaker::System, message));
        Stage::Done
    }

    // ==================== Failure rendering ====================

    /// Report a failed round-0 answer and return the history text standing in for it.
    fn initial_failure(&mut self, participant: usize, e: &AgentError) -> String {
        let agent = Speaker::participant(participant);
        let doc = self.document_name(participant);
        let panel = self.config.protocol == DebateProtocol::Panel;

        let (message, entry) = if e.is_not_found() {
            (
                format!(
                    "Error for {agent}: Report file not found at {}",
                    self.document_path(participant).display()
                ),
                if panel {
                    format!("Error: Report file not found for {agent}.")
                } else {
                    format!("Error: File Not Found - {doc}")
                },
            )
        } else if e.is_context_length() {
            if panel {
                (
                    format!("Error for {agent}: Context Length Error - {e}"),
                    format!("Error: Context Length Error for {agent}."),
                )
            } else {
                (
                    format!("Error for {agent} (R0): Context Length Error - {e}"),
                    format!("Error: Context Length Error - {doc}"),
                )
            }
        } else if panel {
            (
                format!("Error getting answer from {agent}: {e}"),
                format!("Error: {agent} failed to generate an answer."),
            )
        } else {
            (
                format!("Error getting initial answer from {agent}: {e}"),
                format!("Error: Failed to generate initial answer - {doc}"),
            )
        };

        error!("{message}");
        self.emit(DebateEvent::error(message));
        entry
    }

    /// Report a failed debate contribution and return the history text standing in for it.
    fn round_failure(&mut self, participant: usize, round: u32, e: &AgentError) -> String {
        let agent = Speaker::participant(participant);
        let doc = self.document_name(participant);

        let (message, entry) = if e.is_not_found() {
            (
                format!(
                    "Error for {agent}: Report file not found at {} during round {round}.",
                    self.document_path(participant).display()
                ),
                format!("Error: File Not Found - {doc}"),
            )
        } else if e.is_context_length() {
            (
                format!("Error for {agent} (R{round}): Context Length Error - {e}"),
                format!("Error: Context Length Error - {doc}"),
            )
        } else {
            (
                format!("Error getting response from {agent} in round {round}: {e}"),
                format!("Error: Failed to generate response - {doc}"),
            )
        };

        error!("{message}");
        self.emit(DebateEvent::error(message));
        entry
    }

    // ==================== Helpers ====================

    fn emit(&mut self, event: DebateEvent) {
        self.outbox.push_back(event);
    }

    fn abort(&mut self, message: String) -> Stage {
        error!("{message}");
        self.aborted = true;
        self.emit(DebateEvent::new(Speaker::System, message, EventLevel::Fatal));
        Stage::Done
    }

    fn record(&mut self, speaker: Speaker, round: u32, text: String) {
        let entry = DebateHistoryEntry::new(speaker.to_string(), round, text);
        if let Err(e) = self.history.record(entry) {
            error!("Dropping history entry: {e}");
            self.emit(DebateEvent::error(format!("Error recording debate history: {e}")));
        }
    }

    fn current_question(&self) -> String {
        self.questions
            .get(self.current)
            .map(|q| q.content().to_string())
            .unwrap_or_default()
    }

    fn document_path(&self, participant: usize) -> &Path {
        &self.config.answer_documents[participant]
    }

    fn document_name(&self, participant: usize) -> String {
        display_name(self.document_path(participant))
    }

    /// The participant's document, read once per session.
    fn document(&mut self, participant: usize) -> Result<Arc<Document>, DocumentError> {
        if let Some(cached) = &self.documents[participant] {
            return cached.clone();
        }

        let path = self.config.answer_documents[participant].clone();
        let loaded = self
            .loader
            .read(&path)
            .map(|content| Arc::new(Document::from_path(&path, content)));
        if let Err(e) = &loaded {
            warn!("Could not load document for participant {}: {e}", participant + 1);
        }
        self.documents[participant] = Some(loaded.clone());
        loaded
    }
}
