//! Condition generation from natural language descriptions
//!
//! # Example
//! ```no_run
//! use text2cond_llm::{ColumnsInfo, ConditionGenerator, ConditionGeneratorConfig, OpenAIProvider};
//! use std::sync::Arc;
//!
//! # async fn example() -> text2cond_llm::Result<()> {
//! let provider = Arc::new(OpenAIProvider::new("your-api-key".to_string()));
//! let config = ConditionGeneratorConfig::new("gpt-4o").with_temperature(0.0);
//! let generator = ConditionGenerator::new(provider, config);
//!
//! let mut columns = ColumnsInfo::new();
//! columns.insert("amount".to_string(), "float".to_string());
//! columns.insert("category".to_string(), "str".to_string());
//!
//! let condition = generator
//!     .generate("amount over 100 and category is food", &columns)
//!     .await?;
//! println!("{:?}", condition);
//! # Ok(())
//! # }
//! ```

pub mod condition_generator;
pub mod prompt_templates;

pub use condition_generator::{
    parse_condition_response, ConditionGenerator, ConditionGeneratorConfig,
};
pub use prompt_templates::{build_prompt, system_message};
