//! Configuration for building generation clients

use crate::cache::InMemoryLLMCache;
use crate::client::GenerationClient;
use crate::error::{LLMError, Result};
use crate::generator::{ConditionGenerator, ConditionGeneratorConfig};
use crate::provider::{MockProvider, OpenAIProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// LLM configuration
///
/// ```yaml
/// provider: openai
/// api_key: sk-...
/// model: gpt-4o
/// enable_cache: true
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    /// LLM provider (openai, mock)
    pub provider: ProviderKind,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Override of the provider endpoint
    #[serde(default)]
    pub base_url: Option<String>,

    /// Model used for generation
    #[serde(default = "default_model")]
    pub model: String,

    /// Cache responses per request
    #[serde(default)]
    pub enable_cache: bool,

    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Canned payload returned by the mock provider
    #[serde(default)]
    pub mock_response: Option<String>,
}

impl fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("LLMConfig")
            .field("provider", &self.provider)
            .field("api_key", &api_key)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("enable_cache", &self.enable_cache)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("mock_response", &self.mock_response)
            .finish()
    }
}

/// LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAI,
    Mock,
}

fn default_model() -> String {
    ConditionGeneratorConfig::default().model
}

impl LLMConfig {
    /// Create a configuration for the given provider
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            api_key: String::new(),
            base_url: None,
            model: default_model(),
            enable_cache: false,
            temperature: None,
            max_tokens: None,
            mock_response: None,
        }
    }

    /// Parse a YAML (or JSON) configuration document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: LLMConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Check that the configuration can produce a working client
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(LLMError::InvalidConfiguration(
                "model must not be empty".to_string(),
            ));
        }
        if self.provider == ProviderKind::OpenAI && self.api_key.trim().is_empty() {
            return Err(LLMError::InvalidConfiguration(
                "openai provider requires an api_key".to_string(),
            ));
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(LLMError::InvalidConfiguration(format!(
                    "temperature {} is outside 0.0..=2.0",
                    temperature
                )));
            }
        }
        Ok(())
    }

    /// Build the configured client
    pub fn build_client(&self) -> Result<Arc<dyn GenerationClient>> {
        self.validate()?;

        let client: Arc<dyn GenerationClient> = match self.provider {
            ProviderKind::OpenAI => {
                let mut provider = match &self.base_url {
                    Some(url) => OpenAIProvider::with_base_url(self.api_key.clone(), url.clone()),
                    None => OpenAIProvider::new(self.api_key.clone()),
                };
                if self.enable_cache {
                    provider = provider.cache(Arc::new(InMemoryLLMCache::new()));
                }
                Arc::new(provider)
            }
            ProviderKind::Mock => match &self.mock_response {
                Some(response) => Arc::new(MockProvider::with_response(response.clone())),
                None => Arc::new(MockProvider::new()),
            },
        };

        tracing::debug!("Built {} client for model {}", client.name(), self.model);
        Ok(client)
    }

    /// Generator settings derived from this configuration
    pub fn generator_config(&self) -> ConditionGeneratorConfig {
        ConditionGeneratorConfig {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            reference_date: None,
        }
    }

    /// Build a generator backed by the configured client
    pub fn build_generator(&self) -> Result<ConditionGenerator> {
        Ok(ConditionGenerator::new(
            self.build_client()?,
            self.generator_config(),
        ))
    }
}
