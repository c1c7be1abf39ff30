//! text2cond LLM Integration
//!
//! This crate turns free-text filter descriptions into validated condition
//! trees by asking a text-generation service for a JSON document:
//! - Prompt building from the free text, column metadata and current date
//! - Provider clients (OpenAI chat completions, mock)
//! - Optional response caching
//! - Validation of the returned document into a [`text2cond_core::Condition`]
//!
//! Generation makes one network call per request with no retry or timeout;
//! wrap the call when resilience is needed.

// Re-export core types
pub use cache::{InMemoryLLMCache, LLMCache};
pub use client::{GenerationClient, GenerationRequest, GenerationResponse, FINISH_REASON_LENGTH};
pub use columns::{column_metadata, ColumnSpec, ColumnsInfo, TableSchema, TabularSource};
pub use config::{LLMConfig, ProviderKind};
pub use error::{LLMError, Result};

// Re-export providers
pub use provider::{MockProvider, OpenAIProvider};

// Re-export generators
pub use generator::{parse_condition_response, ConditionGenerator, ConditionGeneratorConfig};

pub mod cache;
pub mod client;
pub mod columns;
pub mod config;
pub mod error;
pub mod generator;
pub mod provider;
