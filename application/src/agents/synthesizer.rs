//! Reduction of several answers or a whole debate into one final answer

use super::backend::AgentBackend;
use super::error::AgentError;
use crate::ports::llm_gateway::GatewayError;
use debate_domain::{DebateHistory, PromptTemplate};
use tracing::{info, warn};

const AGENT: &str = "Synthesizer";

/// Returned when the model replies with nothing usable.
pub const EMPTY_SYNTHESIS_TEXT: &str = "Error: Failed to get synthesized answer from LLM.";

#[derive(Clone)]
pub struct Synthesizer {
    backend: AgentBackend,
}

impl Synthesizer {
    pub fn new(backend: AgentBackend) -> Self {
        Self { backend }
    }

    /// Merge independent per-participant answers (panel protocol).
    pub async fn synthesize_answers(
        &self,
        question: &str,
        answers: &[String],
    ) -> Result<String, AgentError> {
        let prompt = PromptTemplate::panel_synthesis(question, answers);
        self.run(&prompt).await
    }

    /// Reconcile a full multi-round history.
    pub async fn synthesize_history(
        &self,
        question: &str,
        history: &DebateHistory,
    ) -> Result<String, AgentError> {
        let prompt = PromptTemplate::debate_synthesis(question, &history.render_for_prompt());
        self.run(&prompt).await
    }

    /// An empty reply becomes [`EMPTY_SYNTHESIS_TEXT`]; any other failure is returned.
    async fn run(&self, prompt: &str) -> Result<String, AgentError> {
        match self.backend.ask_raw(AGENT, prompt).await {
            Ok(reply) if !reply.is_empty() => {
                info!("Received synthesized final answer");
                Ok(reply)
            }
            Ok(_) | Err(AgentError::Gateway(GatewayError::InvalidResponse(_))) => {
                warn!("Synthesis returned an empty reply");
                Ok(EMPTY_SYNTHESIS_TEXT.to_string())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::backend::PromptBudget;
    use crate::testing::{MockEstimator, MockGateway};
    use debate_domain::DebateHistoryEntry;
    use std::sync::Arc;

    fn synthesizer(gateway: Arc<MockGateway>, limit: usize) -> Synthesizer {
        Synthesizer::new(AgentBackend::new(
            gateway,
            PromptBudget::new(Arc::new(MockEstimator::new()), limit),
        ))
    }

    #[tokio::test]
    async fn test_flat_answers() {
        let gateway = Arc::new(MockGateway::replies(&["Both agree on $10M."]));
        let answer = synthesizer(gateway.clone(), 10_000)
            .synthesize_answers("Revenue?", &["$10M".to_string(), "$10M too".to_string()])
            .await
            .unwrap();
        assert_eq!(answer, "Both agree on $10M.");
        assert!(gateway.prompts()[0].contains("--- Agent 2 Answer ---\n$10M too"));
    }

    #[tokio::test]
    async fn test_history() {
        let gateway = Arc::new(MockGateway::replies(&["Final."]));
        let mut history = DebateHistory::new();
        history
            .record(DebateHistoryEntry::new("Answer Agent 1", 0, "$10M"))
            .unwrap();
        let answer = synthesizer(gateway.clone(), 10_000)
            .synthesize_history("Revenue?", &history)
            .await
            .unwrap();
        assert_eq!(answer, "Final.");
        assert!(gateway.prompts()[0].contains("Round 0 - Answer Agent 1:\n$10M"));
    }

    #[tokio::test]
    async fn test_empty_reply_is_sentinel() {
        let gateway = Arc::new(MockGateway::new(vec![
            Ok("   ".to_string()),
            Err(GatewayError::InvalidResponse("no content".to_string())),
        ]));
        let synthesizer = synthesizer(gateway, 10_000);
        let history = DebateHistory::new();
        assert_eq!(
            synthesizer.synthesize_history("Q?", &history).await.unwrap(),
            EMPTY_SYNTHESIS_TEXT
        );
        assert_eq!(
            synthesizer.synthesize_history("Q?", &history).await.unwrap(),
            EMPTY_SYNTHESIS_TEXT
        );
    }

    #[tokio::test]
    async fn test_communication_failure_is_error() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::Timeout)]));
        let result = synthesizer(gateway, 10_000)
            .synthesize_answers("Q?", &["a".to_string()])
            .await;
        assert_eq!(result, Err(AgentError::Gateway(GatewayError::Timeout)));
    }

    #[tokio::test]
    async fn test_synthesis_is_budget_checked() {
        let gateway = Arc::new(MockGateway::replies(&["unused"]));
        let result = synthesizer(gateway.clone(), 3)
            .synthesize_answers("Q?", &["a".to_string()])
            .await;
        assert!(matches!(result, Err(AgentError::ContextLength { .. })));
        assert_eq!(gateway.calls(), 0);
    }
}
