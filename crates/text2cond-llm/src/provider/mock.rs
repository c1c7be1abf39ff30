//! Mock generation client for testing

use crate::client::{GenerationClient, GenerationRequest, GenerationResponse};
use crate::error::{LLMError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock provider returning a canned payload
///
/// Every request is recorded so tests can inspect the instructions sent.
pub struct MockProvider {
    name: String,
    payload: String,
    failure: Option<String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockProvider {
    /// Create a mock that answers with an empty `AndCondition`
    pub fn new() -> Self {
        Self::with_response(r#"{"condition": {"tag": "AndCondition", "conditions": []}}"#.to_string())
    }

    /// Create a mock that answers every request with `payload`
    pub fn with_response(payload: String) -> Self {
        Self {
            name: "mock".to_string(),
            payload,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider whose every call fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationClient for MockProvider {
    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let model = request.model.clone();
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        if let Some(message) = &self.failure {
            return Err(LLMError::ApiCallFailed(message.clone()));
        }

        Ok(GenerationResponse::new(self.payload.clone(), model)
            .with_tokens(10)
            .with_finish_reason("stop"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
