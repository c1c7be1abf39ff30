//! Closed value sets used by leaf conditions

use crate::error::ConditionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared data type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Float,
    Str,
    Date,
}

impl ColumnType {
    pub const ALL: [ColumnType; 4] = [
        ColumnType::Int,
        ColumnType::Float,
        ColumnType::Str,
        ColumnType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Str => "str",
            ColumnType::Date => "date",
        }
    }

    /// Returns true for types that support ordering comparisons numerically
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ConditionError::schema(
                    "column_type",
                    format!("unknown column type '{}', expected one of: int, float, str, date", s),
                )
            })
    }
}

/// Comparison operator of a single-column condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    /// Equal (==)
    #[serde(rename = "==")]
    Eq,
    /// Not equal (!=)
    #[serde(rename = "!=")]
    Ne,
    /// Less than (<)
    #[serde(rename = "<")]
    Lt,
    /// Greater than (>)
    #[serde(rename = ">")]
    Gt,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    Le,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    Ge,
}

impl ComparisonOperator {
    pub const ALL: [ComparisonOperator; 6] = [
        ComparisonOperator::Eq,
        ComparisonOperator::Ne,
        ComparisonOperator::Lt,
        ComparisonOperator::Gt,
        ComparisonOperator::Le,
        ComparisonOperator::Ge,
    ];

    /// The operator token as it appears in documents and query output
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "==",
            ComparisonOperator::Ne => "!=",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::Ge => ">=",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonOperator {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComparisonOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| {
                ConditionError::schema(
                    "operator",
                    format!("unknown operator '{}', expected one of: ==, !=, <, >, <=, >=", s),
                )
            })
    }
}
