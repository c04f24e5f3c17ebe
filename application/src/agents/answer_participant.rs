//! Document-bound answering: initial answers and debate contributions

use super::backend::AgentBackend;
use super::error::AgentError;
use debate_domain::{DebateHistory, PromptTemplate};
use tracing::debug;

/// Answers questions strictly from one document.
///
/// The document text is passed in on every call; the participant itself
/// holds no per-question state.
#[derive(Clone)]
pub struct AnswerParticipant {
    name: String,
    backend: AgentBackend,
}

impl AnswerParticipant {
    pub fn new(name: impl Into<String>, backend: AgentBackend) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Round-0 answer, made without seeing any other participant's output.
    pub async fn answer_initial(&self, question: &str, document: &str) -> Result<String, AgentError> {
        if document.trim().is_empty() {
            return Err(AgentError::EmptyDocument);
        }
        if question.trim().is_empty() {
            return Err(AgentError::EmptyQuestion);
        }

        let prompt = PromptTemplate::answer(document, question);
        debug!("{}: answering initial question", self.name);
        self.backend.ask(&self.name, &prompt).await
    }

    /// Contribution for `round` (>= 1) with the whole history so far in view.
    pub async fn participate(
        &self,
        question: &str,
        history: &DebateHistory,
        document: &str,
        round: u32,
    ) -> Result<String, AgentError> {
        if document.trim().is_empty() {
            return Err(AgentError::EmptyDocument);
        }
        if question.trim().is_empty() {
            return Err(AgentError::EmptyQuestion);
        }

        let prompt = PromptTemplate::debate_participation(
            question,
            document,
            &history.render_for_prompt(),
            round,
        );
        debug!(
            "{}: participating in round {round} with {} history entries",
            self.name,
            history.len()
        );
        self.backend.ask(&self.name, &prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::backend::PromptBudget;
    use crate::ports::llm_gateway::GatewayError;
    use crate::testing::{MockEstimator, MockGateway};
    use debate_domain::{DebateHistoryEntry, EMPTY_HISTORY_TEXT};
    use std::sync::Arc;

    const DOC: &str = "Revenue was $10M in Q1.";

    fn participant(gateway: Arc<MockGateway>, limit: usize) -> AnswerParticipant {
        AnswerParticipant::new(
            "Answer Agent 1",
            AgentBackend::new(gateway, PromptBudget::new(Arc::new(MockEstimator::new()), limit)),
        )
    }

    #[tokio::test]
    async fn test_initial_answer_from_document() {
        let gateway = Arc::new(MockGateway::replies(&["The revenue was $10M in Q1."]));
        let answer = participant(gateway.clone(), 10_000)
            .answer_initial("What was the revenue?", DOC)
            .await
            .unwrap();
        assert!(!answer.is_empty());
        assert!(!answer.starts_with("Error:"));
        let prompt = &gateway.prompts()[0];
        assert!(prompt.contains(DOC));
        assert!(prompt.contains("What was the revenue?"));
    }

    #[tokio::test]
    async fn test_empty_document_renders_legacy_text_without_llm_call() {
        let gateway = Arc::new(MockGateway::replies(&["unused"]));
        let err = participant(gateway.clone(), 10_000)
            .answer_initial("What was the revenue?", "")
            .await
            .unwrap_err();
        assert_eq!(err.to_answer_text(), "Error: Report content is empty.");
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_question_is_rejected() {
        let gateway = Arc::new(MockGateway::replies(&["unused"]));
        let err = participant(gateway.clone(), 10_000)
            .answer_initial("   ", DOC)
            .await
            .unwrap_err();
        assert_eq!(err.to_answer_text(), "Error: Query cannot be empty.");
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_initial_answer_over_budget() {
        let gateway = Arc::new(MockGateway::replies(&["unused"]));
        let err = participant(gateway.clone(), 5)
            .answer_initial("What was the revenue?", DOC)
            .await
            .unwrap_err();
        assert!(err.is_context_length());
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_participate_embeds_history() {
        let gateway = Arc::new(MockGateway::replies(&["  I agree with Agent 2.  "]));
        let mut history = DebateHistory::new();
        history
            .record(DebateHistoryEntry::new("Answer Agent 2", 0, "It was $12M."))
            .unwrap();

        let reply = participant(gateway.clone(), 10_000)
            .participate("Revenue?", &history, DOC, 1)
            .await
            .unwrap();
        assert_eq!(reply, "I agree with Agent 2.");
        let prompt = &gateway.prompts()[0];
        assert!(prompt.contains("Round 0 - Answer Agent 2:\nIt was $12M."));
        assert!(prompt.contains("Your Response for Round 1:"));
    }

    #[tokio::test]
    async fn test_participate_with_empty_history_uses_placeholder() {
        let gateway = Arc::new(MockGateway::replies(&["ok"]));
        participant(gateway.clone(), 10_000)
            .participate("Revenue?", &DebateHistory::new(), DOC, 1)
            .await
            .unwrap();
        assert!(gateway.prompts()[0].contains(EMPTY_HISTORY_TEXT));
    }

    #[tokio::test]
    async fn test_participate_errors() {
        let gateway = Arc::new(MockGateway::new(vec![
            Err(GatewayError::ConnectionError("refused".into())),
            Ok("".into()),
        ]));
        let agent = participant(gateway.clone(), 10_000);
        let history = DebateHistory::new();

        assert_eq!(
            agent.participate("Q?", &history, "", 1).await,
            Err(AgentError::EmptyDocument)
        );
        assert!(matches!(
            agent.participate("Q?", &history, DOC, 1).await,
            Err(AgentError::Gateway(GatewayError::ConnectionError(_)))
        ));
        assert!(matches!(
            agent.participate("Q?", &history, DOC, 1).await,
            Err(AgentError::Gateway(GatewayError::InvalidResponse(_)))
        ));
        assert_eq!(gateway.calls(), 2);
    }
}
