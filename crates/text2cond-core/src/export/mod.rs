//! Exporters render a condition tree into a single line of text.
//!
//! Every exporter implements [`ConditionExporter`]. Dispatch over node kinds
//! is a `match` on [`Condition`], so a new node kind fails to compile until
//! each exporter handles it. Exporters written outside this crate report
//! node kinds they cannot render with
//! [`ConditionError::UnsupportedCondition`].

mod human;
mod query;

pub use human::{operator_word, HumanReadableExporter};
pub use query::QuerySyntaxExporter;

use crate::condition::{Condition, MAX_CONDITION_DEPTH};
use crate::error::{ConditionError, Result};
use std::fmt;
use std::str::FromStr;

/// Renders a condition tree into one target syntax
pub trait ConditionExporter: Send + Sync {
    /// Short identifier used in error messages
    fn name(&self) -> &str;

    /// Render the whole tree rooted at `condition`
    fn export(&self, condition: &Condition) -> Result<String>;
}

/// Fail once recursion goes past the supported nesting
pub(crate) fn ensure_depth(depth: usize) -> Result<()> {
    if depth > MAX_CONDITION_DEPTH {
        log::debug!("Export aborted at depth {}", depth);
        return Err(ConditionError::RecursionLimitExceeded {
            limit: MAX_CONDITION_DEPTH,
        });
    }
    Ok(())
}

impl ConditionError {
    /// Error for an exporter that has no rule for this node kind
    pub fn unsupported(exporter: &dyn ConditionExporter, condition: &Condition) -> Self {
        ConditionError::UnsupportedCondition {
            tag: condition.tag().to_string(),
            exporter: exporter.name().to_string(),
        }
    }
}

/// Built-in output syntaxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Table query expression, e.g. `(amount >= 100) & (category == food)`
    Query,
    /// English sentence, e.g. `amount greater than or equal to 100 AND category is food`
    HumanReadable,
}

impl ExportFormat {
    pub fn exporter(&self) -> Box<dyn ConditionExporter> {
        match self {
            ExportFormat::Query => Box::new(QuerySyntaxExporter),
            ExportFormat::HumanReadable => Box::new(HumanReadableExporter),
        }
    }

    pub fn export(&self, condition: &Condition) -> Result<String> {
        self.exporter().export(condition)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Query => "query",
            ExportFormat::HumanReadable => "human",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "query" | "dataframe" => Ok(ExportFormat::Query),
            "human" | "human_readable" | "text" => Ok(ExportFormat::HumanReadable),
            _ => Err(ConditionError::UnknownExportFormat {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{ColumnType, ComparisonOperator};

    /// Renders leaves only, the way a partial third-party exporter would
    struct LeafOnlyExporter;

    impl ConditionExporter for LeafOnlyExporter {
        fn name(&self) -> &str {
            "leaf-only"
        }

        fn export(&self, condition: &Condition) -> Result<String> {
            match condition {
                Condition::Column(c) => Ok(c.column_name.clone()),
                other => Err(ConditionError::unsupported(self, other)),
            }
        }
    }

    #[test]
    fn test_unsupported_condition_error() {
        let tree = Condition::or(vec![Condition::column(
            "amount",
            ColumnType::Int,
            ComparisonOperator::Lt,
            "5",
        )]);
        let err = LeafOnlyExporter.export(&tree).unwrap_err();
        assert_eq!(
            err,
            ConditionError::UnsupportedCondition {
                tag: "OrCondition".to_string(),
                exporter: "leaf-only".to_string(),
            }
        );
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("query".parse::<ExportFormat>().unwrap(), ExportFormat::Query);
        assert_eq!("Human".parse::<ExportFormat>().unwrap(), ExportFormat::HumanReadable);
    }

    #[test]
    fn test_unknown_export_format_is_typed() {
        let err = "SQL".parse::<ExportFormat>().unwrap_err();
        assert_eq!(
            err,
            ConditionError::UnknownExportFormat {
                name: "SQL".to_string()
            }
        );
        assert_eq!(err.to_string(), "Unknown export format: SQL");
    }

    #[test]
    fn test_export_format_dispatch() {
        let c = Condition::column("amount", ColumnType::Float, ComparisonOperator::Gt, "7");
        assert_eq!(ExportFormat::Query.export(&c).unwrap(), "amount > 7");
        assert_eq!(ExportFormat::HumanReadable.export(&c).unwrap(), "amount greater than 7");
    }

    #[test]
    fn test_depth_limit_on_export() {
        let mut tree = Condition::column("a", ColumnType::Int, ComparisonOperator::Eq, "1");
        for _ in 0..MAX_CONDITION_DEPTH {
            tree = Condition::and(vec![tree]);
        }
        let err = QuerySyntaxExporter.export(&tree).unwrap_err();
        assert_eq!(
            err,
            ConditionError::RecursionLimitExceeded {
                limit: MAX_CONDITION_DEPTH
            }
        );
        assert!(HumanReadableExporter.export(&tree).is_err());
    }
}
