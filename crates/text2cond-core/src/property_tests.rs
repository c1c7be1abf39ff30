//! Property tests for the condition model and exporters
//!
//! - Serializing then parsing a tree yields the same tree
//! - Exporting is deterministic
//! - The query exporter wraps each direct child of a group in one pair of parentheses

use proptest::prelude::*;

use crate::condition::{
    ColumnCondition, ColumnType, ComparisonOperator, Condition, ConditionModel,
};
use crate::export::{ConditionExporter, HumanReadableExporter, QuerySyntaxExporter};

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators
// ═══════════════════════════════════════════════════════════════════════════

fn column_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,11}"
}

fn column_type_strategy() -> impl Strategy<Value = ColumnType> {
    prop::sample::select(ColumnType::ALL.to_vec())
}

fn operator_strategy() -> impl Strategy<Value = ComparisonOperator> {
    prop::sample::select(ComparisonOperator::ALL.to_vec())
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .:-]{0,12}"
}

fn values_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(value_strategy(), 1..=4)
}

fn leaf_strategy() -> impl Strategy<Value = Condition> {
    prop_oneof![
        (
            column_name_strategy(),
            column_type_strategy(),
            operator_strategy(),
            prop::option::of(value_strategy()),
        )
            .prop_map(|(name, ty, op, value)| {
                Condition::Column(ColumnCondition::new(name, ty, op, value))
            }),
        (column_name_strategy(), column_type_strategy(), values_strategy())
            .prop_map(|(name, ty, values)| Condition::column_in(name, ty, values)),
        (column_name_strategy(), column_type_strategy(), values_strategy())
            .prop_map(|(name, ty, values)| Condition::column_not_in(name, ty, values)),
    ]
}

/// Trees up to four levels deep with up to four children per group
fn condition_strategy() -> impl Strategy<Value = Condition> {
    leaf_strategy().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..=4).prop_map(Condition::and),
            prop::collection::vec(inner, 1..=4).prop_map(Condition::or),
        ]
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_serialize_then_parse_is_identity(condition in condition_strategy()) {
        let model = ConditionModel::new(condition);
        let json = model.to_json().unwrap();
        let parsed = ConditionModel::parse(&json).unwrap();
        prop_assert_eq!(parsed, model);
    }

    #[test]
    fn prop_export_is_deterministic(condition in condition_strategy()) {
        let query = QuerySyntaxExporter;
        let human = HumanReadableExporter;
        prop_assert_eq!(query.export(&condition).unwrap(), query.export(&condition).unwrap());
        prop_assert_eq!(human.export(&condition).unwrap(), human.export(&condition).unwrap());
    }

    #[test]
    fn prop_query_groups_parenthesize_children(condition in condition_strategy()) {
        let exporter = QuerySyntaxExporter;
        let separator = match &condition {
            Condition::And(_) => " & ",
            Condition::Or(_) => " | ",
            _ => return Ok(()),
        };

        let expected = condition
            .children()
            .iter()
            .map(|child| format!("({})", exporter.export(child).unwrap()))
            .collect::<Vec<_>>()
            .join(separator);
        prop_assert_eq!(exporter.export(&condition).unwrap(), expected);
    }

    #[test]
    fn prop_human_groups_join_children(condition in condition_strategy()) {
        let exporter = HumanReadableExporter;
        let separator = match &condition {
            Condition::And(_) => " AND ",
            Condition::Or(_) => " OR ",
            _ => return Ok(()),
        };

        let expected = condition
            .children()
            .iter()
            .map(|child| exporter.export(child).unwrap())
            .collect::<Vec<_>>()
            .join(separator);
        prop_assert_eq!(exporter.export(&condition).unwrap(), expected);
    }

    #[test]
    fn prop_unknown_tag_is_rejected(tag in "[A-Z][A-Za-z]{2,15}") {
        prop_assume!(!Condition::TAGS.contains(&tag.as_str()));
        let doc = serde_json::json!({"condition": {"tag": tag, "conditions": []}});
        let err = ConditionModel::from_value(&doc).unwrap_err();
        prop_assert!(err.is_schema_error());
    }
}
