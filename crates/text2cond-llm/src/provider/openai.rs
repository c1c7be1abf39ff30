//! OpenAI chat-completions provider

use crate::cache::LLMCache;
use crate::client::{GenerationClient, GenerationRequest, GenerationResponse};
use crate::error::{LLMError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI provider
pub struct OpenAIProvider {
    api_key: String,
    base_url: String,
    cache: Option<Arc<dyn LLMCache>>,
    client: Client,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create with custom base URL (e.g., for Azure OpenAI or a local proxy)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: None,
            client: Client::new(),
        }
    }

    /// Create with cache
    pub fn with_cache(api_key: String, cache: Arc<dyn LLMCache>) -> Self {
        Self::new(api_key).cache(cache)
    }

    /// Attach a response cache
    pub fn cache(mut self, cache: Arc<dyn LLMCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_body(request: &GenerationRequest) -> Value {
        let mut body = json!({
            "model": request.model,
            "messages": [
                {"role": "system", "content": request.system_instruction},
                {"role": "user", "content": request.user_instruction}
            ],
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    fn parse_response(model: &str, resp_json: &Value) -> Result<GenerationResponse> {
        let payload = resp_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| LLMError::InvalidResponse("No content in response".to_string()))?;

        let total_tokens = resp_json["usage"]["total_tokens"].as_u64().unwrap_or(0);
        let tokens_used = u32::try_from(total_tokens).unwrap_or(u32::MAX);

        let mut response = GenerationResponse::new(payload, model).with_tokens(tokens_used);
        if let Some(reason) = resp_json["choices"][0]["finish_reason"].as_str() {
            response = response.with_finish_reason(reason);
        }
        Ok(response)
    }
}

#[async_trait]
impl GenerationClient for OpenAIProvider {
    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.get(&request).await {
                tracing::debug!("OpenAI cache hit for model {}", request.model);
                return Ok(cached);
            }
        }

        let body = Self::request_body(&request);
        tracing::debug!("Calling OpenAI chat completions with model {}", request.model);

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::ApiCallFailed(format!("OpenAI API call failed: {}", e)))?;

        let status = resp.status();
        let resp_text = resp.text().await?;

        if !status.is_success() {
            tracing::warn!("OpenAI API returned {}", status);
            return Err(LLMError::ApiCallFailed(format!(
                "OpenAI API error ({}): {}",
                status, resp_text
            )));
        }

        let resp_json: Value = serde_json::from_str(&resp_text).map_err(|e| {
            LLMError::InvalidResponse(format!("Failed to parse response envelope: {}", e))
        })?;
        let response = Self::parse_response(&request.model, &resp_json)?;

        if let Some(ref cache) = self.cache {
            cache.set(request, response.clone()).await;
        }

        Ok(response)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
