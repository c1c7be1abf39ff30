//! Error types for text2cond LLM module

use text2cond_core::ConditionError;
use thiserror::Error;

/// Result type alias for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// LLM module errors
#[derive(Debug, Error)]
pub enum LLMError {
    /// External API call failed
    #[error("External API call failed: {0}")]
    ApiCallFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Configuration file could not be parsed
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Provider answered with a payload missing the generated text
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Generated document is not valid JSON or not a valid condition
    #[error(transparent)]
    Condition(#[from] ConditionError),
}

impl LLMError {
    /// The underlying condition error, if generation output was rejected
    pub fn as_condition_error(&self) -> Option<&ConditionError> {
        match self {
            LLMError::Condition(err) => Some(err),
            _ => None,
        }
    }
}
