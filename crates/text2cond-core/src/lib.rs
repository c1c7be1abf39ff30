//! text2cond Core - condition trees and their textual renderings
//!
//! This crate provides:
//! - The condition model: a closed, tagged tree of column comparisons,
//!   membership tests and boolean combinators
//! - Validation of JSON documents into typed trees, with path-qualified errors
//! - The JSON Schema of the document format
//! - Exporters rendering a tree as a query expression or an English sentence

pub mod condition;
pub mod error;
pub mod export;

#[cfg(test)]
mod property_tests;

// Re-export commonly used types
pub use condition::{
    AndCondition, ColumnCondition, ColumnInCondition, ColumnNotInCondition, ColumnType,
    ComparisonOperator, Condition, ConditionModel, ConditionValidator, OrCondition,
    MAX_CONDITION_DEPTH,
};
pub use error::{ConditionError, Result};
pub use export::{
    operator_word, ConditionExporter, ExportFormat, HumanReadableExporter, QuerySyntaxExporter,
};
