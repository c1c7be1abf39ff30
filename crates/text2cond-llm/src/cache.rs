//! LLM response caching
//!
//! Generation requests embed the free text, the column list and the current
//! date, so a request-keyed cache memoizes `(free_text, columns_info)` for the
//! day it was made.

use crate::client::{GenerationRequest, GenerationResponse};
use async_trait::async_trait;
use dashmap::DashMap;

/// LLM cache trait
#[async_trait]
pub trait LLMCache: Send + Sync {
    /// Get a cached response
    async fn get(&self, request: &GenerationRequest) -> Option<GenerationResponse>;

    /// Store a response in cache
    async fn set(&self, request: GenerationRequest, response: GenerationResponse);

    /// Clear the cache
    async fn clear(&self);
}

/// In-memory LLM cache implementation
#[derive(Default)]
pub struct InMemoryLLMCache {
    cache: DashMap<String, GenerationResponse>,
}

impl InMemoryLLMCache {
    /// Create a new in-memory cache
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn cache_key(request: &GenerationRequest) -> String {
        format!(
            "{}\u{1f}{}\u{1f}{}\u{1f}{}\u{1f}{}",
            request.model,
            request.system_instruction,
            request.user_instruction,
            request.max_tokens.unwrap_or(0),
            request.temperature.unwrap_or(0.0)
        )
    }
}

#[async_trait]
impl LLMCache for InMemoryLLMCache {
    async fn get(&self, request: &GenerationRequest) -> Option<GenerationResponse> {
        self.cache
            .get(&Self::cache_key(request))
            .map(|entry| entry.value().clone())
    }

    async fn set(&self, request: GenerationRequest, response: GenerationResponse) {
        self.cache.insert(Self::cache_key(&request), response);
    }

    async fn clear(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_instruction: &str) -> GenerationRequest {
        GenerationRequest::new("gpt-4o", "Schema A", user_instruction)
    }

    #[tokio::test]
    async fn test_cache_get_set() {
        let cache = InMemoryLLMCache::new();
        let request = request("Test prompt");

        assert!(cache.get(&request).await.is_none());

        cache
            .set(request.clone(), GenerationResponse::new("Test response", "gpt-4o"))
            .await;
        let cached = cache.get(&request).await;
        assert_eq!(cached.unwrap().payload(), "Test response");
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_clear() {
        let cache = InMemoryLLMCache::new();
        let request = request("Test");

        cache
            .set(request.clone(), GenerationResponse::new("Response", "gpt-4o"))
            .await;
        assert!(cache.get(&request).await.is_some());

        cache.clear().await;
        assert!(cache.get(&request).await.is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_system_instruction_is_part_of_key() {
        let cache = InMemoryLLMCache::new();

        let schema_a = request("Prompt");
        let schema_b = GenerationRequest::new("gpt-4o", "Schema B", "Prompt");

        cache
            .set(schema_a.clone(), GenerationResponse::new("A", "gpt-4o"))
            .await;

        assert!(cache.get(&schema_b).await.is_none());
        assert_eq!(cache.get(&schema_a).await.unwrap().payload(), "A");
    }
}
