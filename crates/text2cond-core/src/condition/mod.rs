//! Condition Model
//!
//! A condition is a tree of tagged nodes. Leaves compare a single column:
//!
//! ```json
//! {"tag": "ColumnCondition", "column_name": "amount", "column_type": "float",
//!  "operator": ">=", "value": "100"}
//! {"tag": "ColumnInCondition", "column_name": "category", "column_type": "str",
//!  "values": ["food", "transport"]}
//! {"tag": "ColumnNotInCondition", "column_name": "category", "column_type": "str",
//!  "values": ["rent"]}
//! ```
//!
//! Composite nodes combine children:
//!
//! ```json
//! {"tag": "AndCondition", "conditions": [ ... ]}
//! {"tag": "OrCondition", "conditions": [ ... ]}
//! ```
//!
//! A full document wraps the root node as `{"condition": <Condition>}`.
//!
//! ## Supported Column Types
//! - `int`, `float`, `str`, `date`
//!
//! ## Supported Operators
//! - `==`, `!=`, `<`, `>`, `<=`, `>=`
//!
//! Values are always strings; typing them is left to the consumer.

mod model;
mod schema;
mod types;
mod validator;

pub use model::{
    AndCondition, ColumnCondition, ColumnInCondition, ColumnNotInCondition, Condition,
    ConditionModel, OrCondition,
};
pub use types::{ColumnType, ComparisonOperator};
pub use validator::{ConditionValidator, MAX_CONDITION_DEPTH};
