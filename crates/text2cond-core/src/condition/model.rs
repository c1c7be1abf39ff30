//! Condition tree node types

use super::types::{ColumnType, ComparisonOperator};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Comparison of a single column against a value
///
/// The value is kept as a string for every column type; coercion to the
/// column's type is left to whoever consumes the condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCondition {
    pub column_name: String,
    pub column_type: ColumnType,
    pub operator: ComparisonOperator,
    #[serde(default)]
    pub value: Option<String>,
}

impl ColumnCondition {
    pub fn new(
        column_name: impl Into<String>,
        column_type: ColumnType,
        operator: ComparisonOperator,
        value: Option<String>,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            column_type,
            operator,
            value,
        }
    }

    /// Build from raw tokens, rejecting types and operators outside their sets
    pub fn try_new(
        column_name: impl Into<String>,
        column_type: &str,
        operator: &str,
        value: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            column_name: column_name.into(),
            column_type: column_type.parse()?,
            operator: operator.parse()?,
            value: value.map(str::to_string),
        })
    }
}

/// Membership test: the column value is one of `values`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInCondition {
    pub column_name: String,
    pub column_type: ColumnType,
    pub values: Vec<String>,
}

impl ColumnInCondition {
    pub fn new<I, S>(column_name: impl Into<String>, column_type: ColumnType, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column_name: column_name.into(),
            column_type,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn try_new<I, S>(column_name: impl Into<String>, column_type: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(column_name, column_type.parse()?, values))
    }
}

/// Negated membership test: the column value is none of `values`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNotInCondition {
    pub column_name: String,
    pub column_type: ColumnType,
    pub values: Vec<String>,
}

impl ColumnNotInCondition {
    pub fn new<I, S>(column_name: impl Into<String>, column_type: ColumnType, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column_name: column_name.into(),
            column_type,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn try_new<I, S>(column_name: impl Into<String>, column_type: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(column_name, column_type.parse()?, values))
    }
}

/// Conjunction of subconditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndCondition {
    pub conditions: Vec<Condition>,
}

/// Disjunction of subconditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrCondition {
    pub conditions: Vec<Condition>,
}

/// A node in the condition tree, discriminated by its `tag` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag")]
pub enum Condition {
    #[serde(rename = "ColumnCondition")]
    Column(ColumnCondition),
    #[serde(rename = "ColumnInCondition")]
    ColumnIn(ColumnInCondition),
    #[serde(rename = "ColumnNotInCondition")]
    ColumnNotIn(ColumnNotInCondition),
    #[serde(rename = "AndCondition")]
    And(AndCondition),
    #[serde(rename = "OrCondition")]
    Or(OrCondition),
}

impl Condition {
    /// Every discriminator accepted in documents
    pub const TAGS: [&'static str; 5] = [
        "ColumnCondition",
        "ColumnInCondition",
        "ColumnNotInCondition",
        "AndCondition",
        "OrCondition",
    ];

    pub fn column(
        column_name: impl Into<String>,
        column_type: ColumnType,
        operator: ComparisonOperator,
        value: impl Into<String>,
    ) -> Self {
        Condition::Column(ColumnCondition::new(
            column_name,
            column_type,
            operator,
            Some(value.into()),
        ))
    }

    pub fn column_in<I, S>(column_name: impl Into<String>, column_type: ColumnType, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::ColumnIn(ColumnInCondition::new(column_name, column_type, values))
    }

    pub fn column_not_in<I, S>(
        column_name: impl Into<String>,
        column_type: ColumnType,
        values: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::ColumnNotIn(ColumnNotInCondition::new(column_name, column_type, values))
    }

    pub fn and(conditions: Vec<Condition>) -> Self {
        Condition::And(AndCondition { conditions })
    }

    pub fn or(conditions: Vec<Condition>) -> Self {
        Condition::Or(OrCondition { conditions })
    }

    /// The discriminator written to the `tag` field
    pub fn tag(&self) -> &'static str {
        match self {
            Condition::Column(_) => "ColumnCondition",
            Condition::ColumnIn(_) => "ColumnInCondition",
            Condition::ColumnNotIn(_) => "ColumnNotInCondition",
            Condition::And(_) => "AndCondition",
            Condition::Or(_) => "OrCondition",
        }
    }

    /// Direct children of a composite node; empty for leaves
    pub fn children(&self) -> &[Condition] {
        match self {
            Condition::And(and) => &and.conditions,
            Condition::Or(or) => &or.conditions,
            Condition::Column(_) | Condition::ColumnIn(_) | Condition::ColumnNotIn(_) => &[],
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Condition::And(_) | Condition::Or(_))
    }

    /// Number of node levels; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Condition::depth)
            .max()
            .unwrap_or(0)
    }

    /// Names of all columns referenced by leaves, in traversal order
    pub fn column_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_column_names(&mut names);
        names
    }

    fn collect_column_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Condition::Column(c) => names.push(&c.column_name),
            Condition::ColumnIn(c) => names.push(&c.column_name),
            Condition::ColumnNotIn(c) => names.push(&c.column_name),
            Condition::And(_) | Condition::Or(_) => {
                for child in self.children() {
                    child.collect_column_names(names);
                }
            }
        }
    }
}

impl From<ColumnCondition> for Condition {
    fn from(c: ColumnCondition) -> Self {
        Condition::Column(c)
    }
}

impl From<ColumnInCondition> for Condition {
    fn from(c: ColumnInCondition) -> Self {
        Condition::ColumnIn(c)
    }
}

impl From<ColumnNotInCondition> for Condition {
    fn from(c: ColumnNotInCondition) -> Self {
        Condition::ColumnNotIn(c)
    }
}

impl From<AndCondition> for Condition {
    fn from(c: AndCondition) -> Self {
        Condition::And(c)
    }
}

impl From<OrCondition> for Condition {
    fn from(c: OrCondition) -> Self {
        Condition::Or(c)
    }
}

/// Top-level document wrapper: `{"condition": <Condition>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionModel {
    pub condition: Condition,
}

impl ConditionModel {
    pub fn new(condition: impl Into<Condition>) -> Self {
        Self {
            condition: condition.into(),
        }
    }

    pub fn into_condition(self) -> Condition {
        self.condition
    }

    /// Canonical JSON value of this document
    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| crate::error::ConditionError::Serialization(e.to_string()))
    }

    /// Canonical compact JSON text of this document
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| crate::error::ConditionError::Serialization(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::ConditionError::Serialization(e.to_string()))
    }
}

impl From<Condition> for ConditionModel {
    fn from(condition: Condition) -> Self {
        Self { condition }
    }
}
