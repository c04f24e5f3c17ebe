//! Generate Questions use case.
//!
//! Reads a document and produces questions about it without answering them.

use crate::agents::{AgentError, QuestionGenerator};
use crate::ports::document_loader::{DocumentError, DocumentLoader};
use debate_domain::Question;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateQuestionsError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

pub struct GenerateQuestionsUseCase {
    loader: Arc<dyn DocumentLoader>,
    generator: QuestionGenerator,
}

impl GenerateQuestionsUseCase {
    pub fn new(loader: Arc<dyn DocumentLoader>, generator: QuestionGenerator) -> Self {
        Self { loader, generator }
    }

    pub async fn execute(
        &self,
        document: &Path,
        count: usize,
    ) -> Result<Vec<Question>, GenerateQuestionsError> {
        let content = self.loader.read(document)?;
        Ok(self.generator.generate(&content, count).await?)
    }
}
