//! Ask Document use case.
//!
//! Single-turn Q&A against one document, used by the interactive chat.
//! Each question is answered independently from the document alone.

use crate::agents::{AgentError, AnswerParticipant};
use crate::ports::document_loader::{DocumentError, DocumentLoader};
use debate_domain::Document;
use std::path::Path;
use tracing::debug;

/// Answers questions about one loaded document.
pub struct AskDocumentUseCase {
    participant: AnswerParticipant,
    document: Document,
}

impl AskDocumentUseCase {
    pub fn new(participant: AnswerParticipant, document: Document) -> Self {
        Self {
            participant,
            document,
        }
    }

    /// Load the document through `loader` and bind it to `participant`.
    pub fn load(
        loader: &dyn DocumentLoader,
        path: &Path,
        participant: AnswerParticipant,
    ) -> Result<Self, DocumentError> {
        let content = loader.read(path)?;
        Ok(Self::new(participant, Document::from_path(path, content)))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub async fn try_ask(&self, question: &str) -> Result<String, AgentError> {
        debug!("Chat question for {}: {}", self.document.name(), question);
        self.participant
            .answer_initial(question, self.document.content())
            .await
    }

    /// Answer `question`, rendering any failure as `"Error: ..."` text.
    pub async fn ask(&self, question: &str) -> String {
        match self.try_ask(question).await {
            Ok(answer) => answer,
            Err(e) => e.to_answer_text(),
        }
    }
}
