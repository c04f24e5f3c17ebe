//! Question generation from a source document

use super::backend::AgentBackend;
use super::error::AgentError;
use debate_domain::{PromptTemplate, Question, parse_question_list};
use tracing::{info, warn};

const AGENT: &str = "Question Agent";

/// Turns a document into a list of open-ended questions with one LLM call.
#[derive(Clone)]
pub struct QuestionGenerator {
    backend: AgentBackend,
}

impl QuestionGenerator {
    pub fn new(backend: AgentBackend) -> Self {
        Self { backend }
    }

    /// Ask for `count` questions about `document`.
    ///
    /// Empty input and budget failures are errors. A failed or empty model
    /// reply yields an empty list, which callers treat as "no usable
    /// questions". The list is not cut to `count`; a model that returns
    /// more lines produces more questions.
    pub async fn generate(&self, document: &str, count: usize) -> Result<Vec<Question>, AgentError> {
        if document.trim().is_empty() {
            return Err(AgentError::EmptyDocument);
        }
        if count == 0 {
            return Ok(Vec::new());
        }

        let prompt = PromptTemplate::question_generation(document, count);
        let raw = match self.backend.ask_raw(AGENT, &prompt).await {
            Ok(raw) => raw,
            Err(e @ AgentError::Gateway(_)) => {
                warn!("Question generation failed: {e}");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let questions: Vec<Question> = parse_question_list(&raw)
            .into_iter()
            .filter_map(Question::try_new)
            .collect();
        info!("Generated {} questions ({} requested)", questions.len(), count);
        Ok(questions)
    }
}
