//! Condition generation from free text

use crate::client::{GenerationClient, GenerationRequest, GenerationResponse};
use crate::columns::ColumnsInfo;
use crate::error::Result;
use crate::generator::prompt_templates::{build_prompt, system_message};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use text2cond_core::{Condition, ConditionModel};

/// Configuration for condition generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGeneratorConfig {
    /// Model to use for generation (e.g., "gpt-4o")
    pub model: String,
    /// Maximum tokens for response
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 1.0, lower = more deterministic)
    pub temperature: Option<f32>,
    /// Date relative phrases are resolved against; today when unset
    pub reference_date: Option<NaiveDate>,
}

impl Default for ConditionGeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            max_tokens: None,
            temperature: None,
            reference_date: None,
        }
    }
}

impl ConditionGeneratorConfig {
    /// Create a new configuration with a specific model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Pin the current date written into prompts
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }
}

/// Turns free text into validated condition trees using a generation service
///
/// Each `generate` call sends exactly one request. Malformed or
/// schema-violating output is returned as an error; there is no retry.
pub struct ConditionGenerator {
    client: Arc<dyn GenerationClient>,
    config: ConditionGeneratorConfig,
}

impl ConditionGenerator {
    /// Create a new condition generator
    pub fn new(client: Arc<dyn GenerationClient>, config: ConditionGeneratorConfig) -> Self {
        Self { client, config }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn GenerationClient>) -> Self {
        Self::new(client, ConditionGeneratorConfig::default())
    }

    /// Build the request that `generate` would send
    pub fn build_request(&self, free_text: &str, columns: &ColumnsInfo) -> GenerationRequest {
        let today = self
            .config
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        GenerationRequest {
            model: self.config.model.clone(),
            system_instruction: system_message(),
            user_instruction: build_prompt(free_text, columns, today),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    /// Generate a condition tree from a free text description
    ///
    /// # Example
    /// ```no_run
    /// use text2cond_llm::{ColumnsInfo, ConditionGenerator, MockProvider};
    /// use std::sync::Arc;
    ///
    /// # async fn example() -> text2cond_llm::Result<()> {
    /// let provider = Arc::new(MockProvider::new());
    /// let generator = ConditionGenerator::with_defaults(provider);
    ///
    /// let mut columns = ColumnsInfo::new();
    /// columns.insert("amount".to_string(), "float".to_string());
    /// let condition = generator.generate("amount over 100", &columns).await?;
    /// println!("{:?}", condition);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(&self, free_text: &str, columns: &ColumnsInfo) -> Result<Condition> {
        let (condition, _) = self.generate_with_metadata(free_text, columns).await?;
        Ok(condition)
    }

    /// Generate a condition and return it with the raw service response
    pub async fn generate_with_metadata(
        &self,
        free_text: &str,
        columns: &ColumnsInfo,
    ) -> Result<(Condition, GenerationResponse)> {
        let request = self.build_request(free_text, columns);
        tracing::debug!(
            "Requesting condition from {} ({} columns)",
            self.client.name(),
            columns.len()
        );

        let response = self.client.complete(request).await?;
        if response.is_truncated() {
            tracing::warn!(
                "{} stopped at the token limit; payload is likely incomplete",
                self.client.name()
            );
        }
        let condition = parse_condition_response(response.payload())?;

        tracing::info!(
            "Generated {} with depth {} using {} tokens",
            condition.tag(),
            condition.depth(),
            response.tokens_used
        );
        Ok((condition, response))
    }

    /// Update the configuration
    pub fn set_config(&mut self, config: ConditionGeneratorConfig) {
        self.config = config;
    }

    /// Get current configuration
    pub fn config(&self) -> &ConditionGeneratorConfig {
        &self.config
    }
}

/// Validate a generated payload into a condition
///
/// The payload must be exactly one JSON document; surrounding whitespace is
/// the only thing tolerated.
pub fn parse_condition_response(payload: &str) -> Result<Condition> {
    match ConditionModel::parse(payload.trim()) {
        Ok(model) => Ok(model.into_condition()),
        Err(err) => {
            tracing::warn!("Rejected generated condition: {}", err);
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LLMError;
    use crate::provider::MockProvider;
    use text2cond_core::{ColumnType, ComparisonOperator, ConditionError};

    fn columns() -> ColumnsInfo {
        [("amount", "float"), ("category", "str")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_generate_column_condition() {
        let mock_response = r#"{"condition": {"tag": "ColumnCondition", "column_name": "amount",
            "column_type": "float", "operator": ">=", "value": "100"}}"#;

        let provider = Arc::new(MockProvider::with_response(mock_response.to_string()));
        let generator = ConditionGenerator::with_defaults(provider);

        let condition = generator
            .generate("amount greater than or equal to 100", &columns())
            .await
            .unwrap();
        assert_eq!(
            condition,
            Condition::column("amount", ColumnType::Float, ComparisonOperator::Ge, "100")
        );
    }

    #[tokio::test]
    async fn test_single_request_with_schema() {
        let provider = Arc::new(MockProvider::new());
        let config = ConditionGeneratorConfig::new("gpt-4o-mini")
            .with_temperature(0.0)
            .with_reference_date(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        let generator = ConditionGenerator::new(provider.clone(), config);

        generator.generate("anything", &columns()).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gpt-4o-mini");
        assert_eq!(requests[0].temperature, Some(0.0));
        assert!(requests[0]
            .user_instruction
            .contains("The current date is 2025-01-31."));
        assert!(requests[0].system_instruction.contains("\"AndCondition\""));
    }

    #[tokio::test]
    async fn test_invalid_json_is_document_error() {
        let provider = Arc::new(MockProvider::with_response(
            "Here is your condition: amount > 100".to_string(),
        ));
        let generator = ConditionGenerator::with_defaults(provider.clone());

        let err = generator.generate("amount over 100", &columns()).await.unwrap_err();
        assert!(matches!(
            err,
            LLMError::Condition(ConditionError::DocumentParse { .. })
        ));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_schema_violation_is_validation_error() {
        let provider = Arc::new(MockProvider::with_response(
            r#"{"condition": {"tag": "BetweenCondition", "column_name": "amount"}}"#.to_string(),
        ));
        let generator = ConditionGenerator::with_defaults(provider);

        let err = generator.generate("amount between 1 and 5", &columns()).await.unwrap_err();
        assert!(err.as_condition_error().unwrap().is_schema_error());
    }

    #[tokio::test]
    async fn test_api_failure_propagates() {
        let provider = Arc::new(MockProvider::failing("rate limited"));
        let generator = ConditionGenerator::with_defaults(provider);

        let err = generator.generate("amount over 100", &columns()).await.unwrap_err();
        assert!(matches!(err, LLMError::ApiCallFailed(_)));
    }

    #[test]
    fn test_build_request_separates_instructions() {
        let config = ConditionGeneratorConfig::default()
            .with_max_tokens(256)
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let generator = ConditionGenerator::new(Arc::new(MockProvider::new()), config);

        let request = generator.build_request("amount over 100", &columns());
        assert_eq!(request.system_instruction, system_message());
        assert!(request.user_instruction.contains("amount over 100"));
        assert!(!request.user_instruction.contains("\"definitions\""));
        assert_eq!(request.max_tokens, Some(256));
    }

    #[test]
    fn test_parse_condition_response_trims_whitespace() {
        let condition = parse_condition_response(
            "\n  {\"condition\": {\"tag\": \"OrCondition\", \"conditions\": []}}  \n",
        )
        .unwrap();
        assert_eq!(condition, Condition::or(vec![]));
    }

    #[test]
    fn test_default_config() {
        let config = ConditionGeneratorConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, None);
        assert_eq!(config.reference_date, None);
    }
}
