//! Machine-readable JSON Schema of the condition document
//!
//! This is what gets embedded into generation prompts, so it describes the
//! same closed sets the validator enforces.

use super::model::ConditionModel;
use super::types::{ColumnType, ComparisonOperator};
use serde_json::{json, Value};

impl ConditionModel {
    /// JSON Schema (draft-07) for `{"condition": <Condition>}`
    pub fn json_schema() -> Value {
        let column_types: Vec<&str> = ColumnType::ALL.iter().map(ColumnType::as_str).collect();
        let operators: Vec<&str> = ComparisonOperator::ALL
            .iter()
            .map(ComparisonOperator::as_str)
            .collect();

        let column_name = json!({
            "type": "string",
            "title": "The name of the column to apply the condition to."
        });
        let column_type = json!({
            "type": "string",
            "enum": column_types,
            "title": "The data type of the column"
        });
        let values = json!({
            "type": "array",
            "items": {"type": "string"},
            "title": "The list of values to compare the column to."
        });
        let conditions = json!({
            "type": "array",
            "items": {"$ref": "#/definitions/Condition"}
        });

        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "ConditionModel",
            "type": "object",
            "properties": {
                "condition": {"$ref": "#/definitions/Condition"}
            },
            "required": ["condition"],
            "definitions": {
                "Condition": {
                    "oneOf": [
                        {"$ref": "#/definitions/ColumnCondition"},
                        {"$ref": "#/definitions/ColumnInCondition"},
                        {"$ref": "#/definitions/ColumnNotInCondition"},
                        {"$ref": "#/definitions/AndCondition"},
                        {"$ref": "#/definitions/OrCondition"}
                    ]
                },
                "ColumnCondition": {
                    "type": "object",
                    "description": "A condition that is applied to a single column.",
                    "properties": {
                        "tag": {"const": "ColumnCondition"},
                        "column_name": column_name,
                        "column_type": column_type,
                        "operator": {
                            "type": "string",
                            "enum": operators,
                            "title": "The operator of the condition."
                        },
                        "value": {
                            "type": ["string", "null"],
                            "title": "The value to compare the column to."
                        }
                    },
                    "required": ["tag", "column_name", "column_type", "operator"]
                },
                "ColumnInCondition": {
                    "type": "object",
                    "description": "Checks that the column's value is in a list of values.",
                    "properties": {
                        "tag": {"const": "ColumnInCondition"},
                        "column_name": column_name,
                        "column_type": column_type,
                        "values": values
                    },
                    "required": ["tag", "column_name", "column_type", "values"]
                },
                "ColumnNotInCondition": {
                    "type": "object",
                    "description": "Checks that the column's value is not in a list of values.",
                    "properties": {
                        "tag": {"const": "ColumnNotInCondition"},
                        "column_name": column_name,
                        "column_type": column_type,
                        "values": values
                    },
                    "required": ["tag", "column_name", "column_type", "values"]
                },
                "AndCondition": {
                    "type": "object",
                    "description": "All of two or more conditions hold.",
                    "properties": {
                        "tag": {"const": "AndCondition"},
                        "conditions": conditions
                    },
                    "required": ["tag", "conditions"]
                },
                "OrCondition": {
                    "type": "object",
                    "description": "At least one of two or more conditions holds.",
                    "properties": {
                        "tag": {"const": "OrCondition"},
                        "conditions": conditions
                    },
                    "required": ["tag", "conditions"]
                }
            }
        })
    }
}
