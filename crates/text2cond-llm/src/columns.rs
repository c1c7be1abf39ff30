//! Column metadata of tabular data sources

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column name to declared type name, e.g. `{"amount": "float64"}`
pub type ColumnsInfo = BTreeMap<String, String>;

/// Read-only view of a table's columns and their dtypes
pub trait TabularSource {
    /// Column names paired with a type descriptor, in table order
    fn column_types(&self) -> Vec<(String, String)>;
}

/// Derive the column metadata handed to the condition generator
pub fn column_metadata<S: TabularSource + ?Sized>(source: &S) -> ColumnsInfo {
    source.column_types().into_iter().collect()
}

/// A single column declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub dtype: String,
}

/// Owned description of a table's columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, name: impl Into<String>, dtype: impl Into<String>) -> Self {
        self.columns.push(ColumnSpec {
            name: name.into(),
            dtype: dtype.into(),
        });
        self
    }
}

impl TabularSource for TableSchema {
    fn column_types(&self) -> Vec<(String, String)> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.dtype.clone()))
            .collect()
    }
}

impl TabularSource for ColumnsInfo {
    fn column_types(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// Render columns as `name (type), name (type)` for prompts
pub fn describe_columns(columns: &ColumnsInfo) -> String {
    columns
        .iter()
        .map(|(name, dtype)| format!("{} ({})", name, dtype))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_metadata_from_schema() {
        let schema = TableSchema::new()
            .with_column("category", "object")
            .with_column("amount", "float64");

        let info = column_metadata(&schema);
        assert_eq!(info.len(), 2);
        assert_eq!(info["amount"], "float64");
        assert_eq!(info["category"], "object");
        // Source is left untouched
        assert_eq!(schema.columns[0].name, "category");
    }

    #[test]
    fn test_describe_columns() {
        let info: ColumnsInfo = [("amount", "float"), ("category", "str")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(describe_columns(&info), "amount (float), category (str)");
        assert_eq!(describe_columns(&ColumnsInfo::new()), "");
    }

    #[test]
    fn test_schema_deserializes() {
        let schema: TableSchema = serde_yaml::from_str(
            "columns:\n  - name: amount\n    dtype: float64\n  - name: date\n    dtype: datetime64[ns]\n",
        )
        .unwrap();
        assert_eq!(column_metadata(&schema)["date"], "datetime64[ns]");
    }
}
