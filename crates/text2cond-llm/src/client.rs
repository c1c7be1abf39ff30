//! Contract between the condition generator and a text-generation service
//!
//! A request carries two instructions: the system instruction (the document
//! schema) and the user instruction (columns, free text, rules and date).
//! The service answers with a text payload that should be one JSON document.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Finish reason reported when the service stopped at its token limit
pub const FINISH_REASON_LENGTH: &str = "length";

/// One generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier (e.g., "gpt-4o")
    pub model: String,

    /// Instruction fixing the output format
    pub system_instruction: String,

    /// Instruction describing what to generate
    pub user_instruction: String,

    pub max_tokens: Option<u32>,

    /// Sampling temperature; service default when unset
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    pub fn new(
        model: impl Into<String>,
        system_instruction: impl Into<String>,
        user_instruction: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system_instruction: system_instruction.into(),
            user_instruction: user_instruction.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Text returned by the service for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    payload: String,

    /// Model that produced the payload
    pub model: String,

    pub tokens_used: u32,

    /// Why generation stopped, when the service reports it
    pub finish_reason: Option<String>,
}

impl GenerationResponse {
    pub fn new(payload: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            model: model.into(),
            tokens_used: 0,
            finish_reason: None,
        }
    }

    /// The generated text, exactly as the service returned it
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn into_payload(self) -> String {
        self.payload
    }

    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens_used = tokens;
        self
    }

    pub fn with_finish_reason(mut self, reason: impl Into<String>) -> Self {
        self.finish_reason = Some(reason.into());
        self
    }

    /// True when the service cut the payload off at its token limit
    pub fn is_truncated(&self) -> bool {
        self.finish_reason.as_deref() == Some(FINISH_REASON_LENGTH)
    }
}

/// The text-generation collaborator
///
/// One `complete` is one request to the service. Implementations do not
/// retry and impose no timeout of their own.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Send both instructions and return the generated payload
    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResponse>;

    /// Short identifier used in logs
    fn name(&self) -> &str;
}
