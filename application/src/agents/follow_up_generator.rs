//! Refined follow-up questions for unsatisfactory answers

use super::backend::AgentBackend;
use debate_domain::{PromptTemplate, Question, parse_follow_up};
use tracing::{debug, warn};

const AGENT: &str = "Follow-up Generator";

#[derive(Clone)]
pub struct FollowUpGenerator {
    backend: AgentBackend,
}

impl FollowUpGenerator {
    pub fn new(backend: AgentBackend) -> Self {
        Self { backend }
    }

    /// One follow-up question targeting what `answer` missed.
    ///
    /// `None` when the call fails, the reply is empty, or the reply just
    /// repeats `question`.
    pub async fn generate_follow_up(&self, question: &str, answer: &str) -> Option<Question> {
        let prompt = PromptTemplate::follow_up(question, answer);
        let reply = match self.backend.ask_raw(AGENT, &prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Follow-up generation failed: {e}");
                return None;
            }
        };

        let follow_up = parse_follow_up(&reply, question).and_then(Question::try_new);
        if follow_up.is_none() {
            debug!("No usable follow-up question in reply");
        }
        follow_up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::backend::PromptBudget;
    use crate::ports::llm_gateway::GatewayError;
    use crate::testing::{MockEstimator, MockGateway};
    use std::sync::Arc;

    fn generator(gateway: Arc<MockGateway>) -> FollowUpGenerator {
        FollowUpGenerator::new(AgentBackend::new(
            gateway,
            PromptBudget::new(Arc::new(MockEstimator::new()), 10_000),
        ))
    }

    #[tokio::test]
    async fn test_extracts_marked_question() {
        let gateway = Arc::new(MockGateway::replies(&[
            "Follow-up Question: What was the Q2 revenue?",
        ]));
        let follow_up = generator(gateway).generate_follow_up("Revenue?", "Unknown.").await;
        assert_eq!(
            follow_up.as_ref().map(Question::content),
            Some("What was the Q2 revenue?")
        );
    }

    #[tokio::test]
    async fn test_repeated_question_is_absent() {
        let gateway = Arc::new(MockGateway::replies(&["Follow-up Question: Revenue?"]));
        assert!(generator(gateway).generate_follow_up("Revenue?", "Unknown.").await.is_none());
    }

    #[tokio::test]
    async fn test_failure_is_absent() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::Timeout)]));
        assert!(generator(gateway).generate_follow_up("Q?", "A.").await.is_none());
    }
}
