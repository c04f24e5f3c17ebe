//! Scripted test doubles for the application ports.

use crate::ports::document_loader::{DocumentError, DocumentLoader};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::token_estimator::TokenEstimator;
use crate::ports::transcript::{TranscriptError, TranscriptSink};
use async_trait::async_trait;
use debate_domain::{ChatRequest, Model, Role};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// ==================== MockGateway ====================

/// Replays scripted replies in order and records every request.
pub struct MockGateway {
    model: Model,
    responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockGateway {
    pub fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            model: Model::Gpt4o,
            responses: Mutex::new(VecDeque::from(responses)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replies(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Content of the user message of every request, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| {
                r.messages
                    .iter()
                    .find(|m| m.role == Role::User)
                    .map(|m| m.content.clone())
            })
            .collect()
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
    }
}

/// Records each request and never answers.
pub struct HangingGateway {
    model: Model,
    calls: Mutex<usize>,
}

impl HangingGateway {
    pub fn new() -> Self {
        Self {
            model: Model::Gpt4o,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl LlmGateway for HangingGateway {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<String, GatewayError> {
        *self.calls.lock().unwrap() += 1;
        std::future::pending().await
    }
}

// ==================== MockEstimator ====================

/// One token per `chars_per_token` bytes, or always failing.
pub struct MockEstimator {
    chars_per_token: Option<usize>,
}

impl MockEstimator {
    pub fn new() -> Self {
        Self {
            chars_per_token: Some(4),
        }
    }

    pub fn failing() -> Self {
        Self {
            chars_per_token: None,
        }
    }
}

impl TokenEstimator for MockEstimator {
    fn estimate(&self, text: &str, _model: &Model) -> Option<usize> {
        self.chars_per_token.map(|n| text.len().div_ceil(n))
    }
}

// ==================== MockLoader ====================

/// In-memory documents keyed by path; unknown paths are not found.
#[derive(Default)]
pub struct MockLoader {
    files: HashMap<PathBuf, Result<String, DocumentError>>,
    reads: Mutex<Vec<PathBuf>>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files
            .insert(PathBuf::from(path), Ok(content.to_string()));
        self
    }

    pub fn with_error(mut self, path: &str, error: DocumentError) -> Self {
        self.files.insert(PathBuf::from(path), Err(error));
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.lock().unwrap().len()
    }
}

impl DocumentLoader for MockLoader {
    fn read(&self, path: &Path) -> Result<String, DocumentError> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        self.files
            .get(path)
            .cloned()
            .unwrap_or_else(|| {
                Err(DocumentError::NotFound {
                    path: path.to_path_buf(),
                })
            })
    }
}

// ==================== MemoryTranscript ====================

#[derive(Default)]
pub struct TranscriptState {
    pub header: Option<String>,
    pub sections: Vec<String>,
    pub writes: usize,
}

/// Transcript kept in memory; clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryTranscript {
    state: Arc<Mutex<TranscriptState>>,
    fail_start: bool,
    fail_appends: Arc<Mutex<Vec<usize>>>,
}

impl MemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_start() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    /// Fail the append of the section with this zero-based index.
    pub fn fail_append(self, index: usize) -> Self {
        self.fail_appends.lock().unwrap().push(index);
        self
    }

    pub fn contents(&self) -> String {
        let state = self.state.lock().unwrap();
        let mut out = state.header.clone().unwrap_or_default();
        for section in &state.sections {
            out.push_str(section);
        }
        out
    }

    pub fn sections(&self) -> Vec<String> {
        self.state.lock().unwrap().sections.clone()
    }

    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    pub fn is_started(&self) -> bool {
        self.state.lock().unwrap().header.is_some()
    }
}

impl TranscriptSink for MemoryTranscript {
    fn start(&mut self, header: &str) -> Result<(), TranscriptError> {
        if self.fail_start {
            return Err(TranscriptError::Io {
                location: "memory".to_string(),
                message: "read-only".to_string(),
            });
        }
        let mut state = self.state.lock().unwrap();
        state.header = Some(header.to_string());
        state.sections.clear();
        state.writes += 1;
        Ok(())
    }

    fn append(&mut self, section: &str) -> Result<(), TranscriptError> {
        let mut state = self.state.lock().unwrap();
        if state.header.is_none() {
            return Err(TranscriptError::NotStarted);
        }
        let index = state.sections.len();
        if self.fail_appends.lock().unwrap().contains(&index) {
            self.fail_appends.lock().unwrap().retain(|i| *i != index);
            return Err(TranscriptError::Io {
                location: "memory".to_string(),
                message: "disk full".to_string(),
            });
        }
        state.sections.push(section.to_string());
        state.writes += 1;
        Ok(())
    }
}
