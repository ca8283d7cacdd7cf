//! Mock implementations for testing the turn runtime

use crate::classifier::IntentClassifier;
use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use crate::state_machine::Intent;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// Mock LLM Service
// ============================================================================

/// Mock LLM service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Mock Classifiers
// ============================================================================

/// Classifier returning queued results; an empty queue yields an error
pub struct MockClassifier {
    results: Mutex<VecDeque<Result<Intent, LlmError>>>,
    /// Record of classified utterances
    pub utterances: Mutex<Vec<String>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            utterances: Mutex::new(Vec::new()),
        }
    }

    pub fn queue(&self, result: Result<Intent, LlmError>) {
        self.results.lock().unwrap().push_back(result);
    }

    pub fn recorded_utterances(&self) -> Vec<String> {
        self.utterances.lock().unwrap().clone()
    }
}

#[async_trait]
impl IntentClassifier for MockClassifier {
    async fn classify(&self, utterance: &str) -> Result<Intent, LlmError> {
        self.utterances.lock().unwrap().push(utterance.to_string());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::unknown("No mock intent queued")))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Classifier that never answers, for exercising timeouts
pub struct PendingClassifier;

#[async_trait]
impl IntentClassifier for PendingClassifier {
    async fn classify(&self, _utterance: &str) -> Result<Intent, LlmError> {
        std::future::pending().await
    }

    fn name(&self) -> &str {
        "pending"
    }
}
