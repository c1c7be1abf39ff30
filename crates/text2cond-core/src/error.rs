//! Error types for text2cond core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConditionError {
    /// Input is not well-formed JSON
    #[error("Document parse error at line {line}, column {column}: {message}")]
    DocumentParse {
        line: usize,
        column: usize,
        message: String,
    },

    /// Well-formed JSON that does not match the condition schema
    #[error("Schema validation error at '{path}': {message}")]
    SchemaValidation { path: String, message: String },

    /// Exporter cannot render this kind of node
    #[error("Exporter '{exporter}' does not support condition '{tag}'")]
    UnsupportedCondition { tag: String, exporter: String },

    /// Tree is nested deeper than the configured bound
    #[error("Condition nesting exceeds the limit of {limit} levels")]
    RecursionLimitExceeded { limit: usize },

    /// Export format name not recognised
    #[error("Unknown export format: {name}")]
    UnknownExportFormat { name: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ConditionError {
    /// Create a schema validation error for the given path
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConditionError::SchemaValidation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error came from JSON syntax rather than structure
    pub fn is_document_error(&self) -> bool {
        matches!(self, ConditionError::DocumentParse { .. })
    }

    /// Returns true if the error is a schema violation
    pub fn is_schema_error(&self) -> bool {
        matches!(self, ConditionError::SchemaValidation { .. })
    }
}

impl From<serde_json::Error> for ConditionError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Syntax | Category::Eof | Category::Io => ConditionError::DocumentParse {
                line: err.line(),
                column: err.column(),
                message: err.to_string(),
            },
            Category::Data => ConditionError::schema("$", err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConditionError>;
