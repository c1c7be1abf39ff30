//! Validation of JSON documents into condition trees
//!
//! Documents are walked recursively, dispatching on the `tag` field of every
//! node. The first violation found anywhere in the tree aborts the whole
//! parse; no partial tree is ever returned.

use super::model::{
    AndCondition, ColumnCondition, ColumnInCondition, ColumnNotInCondition, Condition,
    ConditionModel, OrCondition,
};
use super::types::{ColumnType, ComparisonOperator};
use crate::error::{ConditionError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Deepest condition nesting accepted by the validator and the exporters
pub const MAX_CONDITION_DEPTH: usize = 64;

/// JSON levels allowed on top of two per condition level (object + array)
const JSON_NESTING_SLACK: usize = 16;

const LEAF_FIELDS: &[&str] = &["tag", "column_name", "column_type", "operator", "value"];
const MEMBERSHIP_FIELDS: &[&str] = &["tag", "column_name", "column_type", "values"];
const COMPOSITE_FIELDS: &[&str] = &["tag", "conditions"];

/// Validator turning JSON into typed conditions
#[derive(Debug, Clone)]
pub struct ConditionValidator {
    /// Whether fields not belonging to a node are tolerated
    allow_unknown_fields: bool,
    max_depth: usize,
}

impl ConditionValidator {
    /// Create a validator that ignores unknown fields
    pub fn new() -> Self {
        Self {
            allow_unknown_fields: true,
            max_depth: MAX_CONDITION_DEPTH,
        }
    }

    /// Allow or reject fields that no node kind declares
    pub fn allow_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse JSON text into a validated document
    ///
    /// A tree at the depth bound nests deeper than serde_json's default
    /// recursion limit, so that limit is lifted and replaced by a bound
    /// derived from `max_depth`.
    pub fn parse_document(&self, json: &str) -> Result<ConditionModel> {
        let max_nesting = self.max_depth * 2 + JSON_NESTING_SLACK;
        if json_nesting(json) > max_nesting {
            log::debug!("Rejected condition document nested beyond {} levels", max_nesting);
            return Err(ConditionError::RecursionLimitExceeded {
                limit: self.max_depth,
            });
        }

        let mut de = serde_json::Deserializer::from_str(json);
        de.disable_recursion_limit();
        let value = Value::deserialize(&mut de)
            .and_then(|value| de.end().map(|()| value))
            .map_err(|e| {
                let err = ConditionError::from(e);
                log::debug!("Rejected condition document: {}", err);
                err
            })?;
        self.validate_model(&value)
    }

    /// Validate an already parsed `{"condition": ...}` document
    pub fn validate_model(&self, value: &Value) -> Result<ConditionModel> {
        let obj = expect_object(value, "$")?;
        self.check_fields(obj, &["condition"], "$")?;

        let condition = obj
            .get("condition")
            .ok_or_else(|| ConditionError::schema("$", "missing required field 'condition'"))?;

        let condition = self.validate_condition(condition, "condition")?;
        log::debug!(
            "Validated {} document with depth {}",
            condition.tag(),
            condition.depth()
        );
        Ok(ConditionModel { condition })
    }

    /// Validate a single condition node located at `path`
    pub fn validate_condition(&self, value: &Value, path: &str) -> Result<Condition> {
        self.validate_at_depth(value, path, 1)
    }

    fn validate_at_depth(&self, value: &Value, path: &str, depth: usize) -> Result<Condition> {
        if depth > self.max_depth {
            return Err(ConditionError::RecursionLimitExceeded {
                limit: self.max_depth,
            });
        }

        let obj = expect_object(value, path)?;
        let tag = match obj.get("tag") {
            Some(Value::String(tag)) => tag.as_str(),
            Some(other) => {
                return Err(ConditionError::schema(
                    field_path(path, "tag"),
                    format!("expected string, got {}", type_name(other)),
                ))
            }
            None => {
                return Err(ConditionError::schema(
                    path,
                    "missing discriminator field 'tag'",
                ))
            }
        };

        match tag {
            "ColumnCondition" => {
                self.check_fields(obj, LEAF_FIELDS, path)?;
                Ok(Condition::Column(ColumnCondition {
                    column_name: required_string(obj, "column_name", path)?,
                    column_type: column_type(obj, path)?,
                    operator: operator(obj, path)?,
                    value: optional_string(obj, "value", path)?,
                }))
            }
            "ColumnInCondition" => {
                self.check_fields(obj, MEMBERSHIP_FIELDS, path)?;
                Ok(Condition::ColumnIn(ColumnInCondition {
                    column_name: required_string(obj, "column_name", path)?,
                    column_type: column_type(obj, path)?,
                    values: string_list(obj, "values", path)?,
                }))
            }
            "ColumnNotInCondition" => {
                self.check_fields(obj, MEMBERSHIP_FIELDS, path)?;
                Ok(Condition::ColumnNotIn(ColumnNotInCondition {
                    column_name: required_string(obj, "column_name", path)?,
                    column_type: column_type(obj, path)?,
                    values: string_list(obj, "values", path)?,
                }))
            }
            "AndCondition" => {
                self.check_fields(obj, COMPOSITE_FIELDS, path)?;
                let conditions = self.children(obj, path, depth)?;
                Ok(Condition::And(AndCondition { conditions }))
            }
            "OrCondition" => {
                self.check_fields(obj, COMPOSITE_FIELDS, path)?;
                let conditions = self.children(obj, path, depth)?;
                Ok(Condition::Or(OrCondition { conditions }))
            }
            unknown => Err(ConditionError::schema(
                field_path(path, "tag"),
                format!(
                    "unknown condition tag '{}', expected one of: {}",
                    unknown,
                    Condition::TAGS.join(", ")
                ),
            )),
        }
    }

    fn children(&self, obj: &Map<String, Value>, path: &str, depth: usize) -> Result<Vec<Condition>> {
        let list_path = field_path(path, "conditions");
        let items = match obj.get("conditions") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ConditionError::schema(
                    list_path,
                    format!("expected array of conditions, got {}", type_name(other)),
                ))
            }
            None => {
                return Err(ConditionError::schema(
                    path,
                    "missing required field 'conditions'",
                ))
            }
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.validate_at_depth(item, &format!("{}[{}]", list_path, i), depth + 1))
            .collect()
    }

    fn check_fields(&self, obj: &Map<String, Value>, allowed: &[&str], path: &str) -> Result<()> {
        if self.allow_unknown_fields {
            return Ok(());
        }
        match obj.keys().find(|key| !allowed.contains(&key.as_str())) {
            Some(key) => Err(ConditionError::schema(
                field_path(path, key),
                "unknown field",
            )),
            None => Ok(()),
        }
    }
}

impl Default for ConditionValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionModel {
    /// Parse and validate a JSON document with the default validator
    pub fn parse(json: &str) -> Result<Self> {
        ConditionValidator::new().parse_document(json)
    }

    /// Validate an already decoded JSON value with the default validator
    pub fn from_value(value: &Value) -> Result<Self> {
        ConditionValidator::new().validate_model(value)
    }
}

/// Deepest bracket nesting in `json`, ignoring brackets inside strings
fn json_nesting(json: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in json.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

fn field_path(path: &str, field: &str) -> String {
    if path == "$" {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        ConditionError::schema(path, format!("expected object, got {}", type_name(value)))
    })
}

fn required_string(obj: &Map<String, Value>, field: &str, path: &str) -> Result<String> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ConditionError::schema(
            field_path(path, field),
            format!("expected string, got {}", type_name(other)),
        )),
        None => Err(ConditionError::schema(
            path,
            format!("missing required field '{}'", field),
        )),
    }
}

fn optional_string(obj: &Map<String, Value>, field: &str, path: &str) -> Result<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ConditionError::schema(
            field_path(path, field),
            format!("expected string or null, got {}", type_name(other)),
        )),
    }
}

fn string_list(obj: &Map<String, Value>, field: &str, path: &str) -> Result<Vec<String>> {
    let list_path = field_path(path, field);
    let items = match obj.get(field) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ConditionError::schema(
                list_path,
                format!("expected array of strings, got {}", type_name(other)),
            ))
        }
        None => {
            return Err(ConditionError::schema(
                path,
                format!("missing required field '{}'", field),
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(ConditionError::schema(
                format!("{}[{}]", list_path, i),
                format!("expected string, got {}", type_name(other)),
            )),
        })
        .collect()
}

fn column_type(obj: &Map<String, Value>, path: &str) -> Result<ColumnType> {
    let raw = required_string(obj, "column_type", path)?;
    raw.parse::<ColumnType>()
        .map_err(|e| relocate(e, field_path(path, "column_type")))
}

fn operator(obj: &Map<String, Value>, path: &str) -> Result<ComparisonOperator> {
    let raw = required_string(obj, "operator", path)?;
    raw.parse::<ComparisonOperator>()
        .map_err(|e| relocate(e, field_path(path, "operator")))
}

/// Re-anchor a field-level error at its full document path
fn relocate(err: ConditionError, full_path: String) -> ConditionError {
    match err {
        ConditionError::SchemaValidation { message, .. } => ConditionError::SchemaValidation {
            path: full_path,
            message,
        },
        other => other,
    }
}
