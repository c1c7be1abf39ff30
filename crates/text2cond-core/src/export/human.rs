//! Natural-language exporter

use super::{ensure_depth, ConditionExporter};
use crate::condition::Condition;
use crate::error::Result;

const NULL_LITERAL: &str = "None";

/// Word form of an operator or matching keyword
///
/// Tokens without a word form are returned unchanged. `like` and `ilike`
/// have no node kind yet but are kept so future operators render sensibly.
pub fn operator_word(token: &str) -> &str {
    match token {
        ">" => "greater than",
        "<" => "less than",
        ">=" => "greater than or equal to",
        "<=" => "less than or equal to",
        "=" | "==" => "is",
        "!=" => "does not equal",
        "like" => "contains",
        "ilike" => "contains (case insensitive)",
        other => other,
    }
}

/// Renders conditions as an English sentence
///
/// Groups are joined with `AND`/`OR` without parentheses, so deeply nested
/// trees read ambiguously. Use [`super::QuerySyntaxExporter`] when structure
/// matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanReadableExporter;

impl HumanReadableExporter {
    fn render(&self, condition: &Condition, depth: usize) -> Result<String> {
        ensure_depth(depth)?;

        let rendered = match condition {
            Condition::Column(c) => format!(
                "{} {} {}",
                c.column_name,
                operator_word(c.operator.as_str()),
                c.value.as_deref().unwrap_or(NULL_LITERAL)
            ),
            Condition::ColumnIn(c) => {
                format!("{} is one of: {}", c.column_name, c.values.join(", "))
            }
            Condition::ColumnNotIn(c) => {
                format!("{} is not one of: {}", c.column_name, c.values.join(", "))
            }
            Condition::And(and) => self.render_group(&and.conditions, " AND ", depth)?,
            Condition::Or(or) => self.render_group(&or.conditions, " OR ", depth)?,
        };
        Ok(rendered)
    }

    fn render_group(&self, children: &[Condition], separator: &str, depth: usize) -> Result<String> {
        let parts = children
            .iter()
            .map(|child| self.render(child, depth + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join(separator))
    }
}

impl ConditionExporter for HumanReadableExporter {
    fn name(&self) -> &str {
        "human"
    }

    fn export(&self, condition: &Condition) -> Result<String> {
        self.render(condition, 1)
    }
}
