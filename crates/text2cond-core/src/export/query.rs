//! Table-query syntax exporter

use super::{ensure_depth, ConditionExporter};
use crate::condition::Condition;
use crate::error::Result;

/// Rendered in place of a missing comparison value
const NULL_LITERAL: &str = "None";

/// Renders conditions as a dataframe query expression
///
/// Every child of an `And`/`Or` node is wrapped in parentheses, so the output
/// never depends on operator precedence:
///
/// ```text
/// (amount >= 100) & ((category == food) | (category == transport))
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QuerySyntaxExporter;

impl QuerySyntaxExporter {
    fn render(&self, condition: &Condition, depth: usize) -> Result<String> {
        ensure_depth(depth)?;

        let rendered = match condition {
            Condition::Column(c) => format!(
                "{} {} {}",
                c.column_name,
                c.operator,
                c.value.as_deref().unwrap_or(NULL_LITERAL)
            ),
            Condition::ColumnIn(c) => format!("{}.isin([{}])", c.column_name, c.values.join(", ")),
            Condition::ColumnNotIn(c) => {
                format!("~{}.isin([{}])", c.column_name, c.values.join(", "))
            }
            Condition::And(and) => self.render_group(&and.conditions, " & ", depth)?,
            Condition::Or(or) => self.render_group(&or.conditions, " | ", depth)?,
        };
        Ok(rendered)
    }

    fn render_group(&self, children: &[Condition], separator: &str, depth: usize) -> Result<String> {
        let parts = children
            .iter()
            .map(|child| self.render(child, depth + 1).map(|s| format!("({})", s)))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join(separator))
    }
}

impl ConditionExporter for QuerySyntaxExporter {
    fn name(&self) -> &str {
        "query"
    }

    fn export(&self, condition: &Condition) -> Result<String> {
        self.render(condition, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{ColumnCondition, ColumnType, ComparisonOperator};

    #[test]
    fn test_not_in_is_negated() {
        let c = Condition::column_not_in("category", ColumnType::Str, ["rent", "utilities"]);
        assert_eq!(
            QuerySyntaxExporter.export(&c).unwrap(),
            "~category.isin([rent, utilities])"
        );
    }

    #[test]
    fn test_nested_groups_are_parenthesized() {
        let tree = Condition::and(vec![
            Condition::column("amount", ColumnType::Float, ComparisonOperator::Ge, "100"),
            Condition::or(vec![
                Condition::column("category", ColumnType::Str, ComparisonOperator::Eq, "food"),
                Condition::column_in("zone", ColumnType::Int, ["1", "2"]),
            ]),
        ]);
        assert_eq!(
            QuerySyntaxExporter.export(&tree).unwrap(),
            "(amount >= 100) & ((category == food) | (zone.isin([1, 2])))"
        );
    }

    #[test]
    fn test_missing_value() {
        let c = Condition::Column(ColumnCondition::new(
            "closed_at",
            ColumnType::Date,
            ComparisonOperator::Ne,
            None,
        ));
        assert_eq!(QuerySyntaxExporter.export(&c).unwrap(), "closed_at != None");
    }

    #[test]
    fn test_single_child_group() {
        let tree = Condition::or(vec![Condition::column(
            "amount",
            ColumnType::Int,
            ComparisonOperator::Lt,
            "3",
        )]);
        assert_eq!(QuerySyntaxExporter.export(&tree).unwrap(), "(amount < 3)");
    }
}
