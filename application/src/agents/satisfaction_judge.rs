//! LLM-backed check of whether an answer resolves a question

use super::backend::AgentBackend;
use debate_domain::{PromptTemplate, parse_structured_reply};
use serde::Serialize;
use tracing::{debug, warn};

const AGENT: &str = "Satisfaction Judge";

/// Verdict on one answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub satisfied: bool,
    pub reason: Option<String>,
}

/// Classifies answers as satisfying or not, with a short justification.
#[derive(Clone)]
pub struct SatisfactionJudge {
    backend: AgentBackend,
}

impl SatisfactionJudge {
    pub fn new(backend: AgentBackend) -> Self {
        Self { backend }
    }

    /// Judge `answer` against `question`.
    ///
    /// Never fails: a failed call is an unsatisfied assessment whose reason
    /// describes the error, and an unparseable reply is unsatisfied with no
    /// reason.
    pub async fn judge(&self, question: &str, answer: &str) -> Assessment {
        let prompt = PromptTemplate::satisfaction(question, answer);
        match self.backend.ask_raw(AGENT, &prompt).await {
            Ok(reply) => {
                let parsed = parse_structured_reply(&reply);
                debug!("Satisfaction verdict: {:?}", parsed.verdict);
                Assessment {
                    satisfied: parsed.is_satisfied(),
                    reason: parsed.reason,
                }
            }
            Err(e) => {
                warn!("Satisfaction check failed: {e}");
                Assessment {
                    satisfied: false,
                    reason: Some(format!("Error during satisfaction check: {e}")),
                }
            }
        }
    }
}
