//! Row access.
//!
//! The engine never looks inside a record directly. It asks the [`Row`]
//! trait for the row's identifier and for field values by name.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{Number, Value};

/// Stable, unique identifier of a row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Numeric identifier.
    Int(i64),
    /// Textual identifier (e.g. `"P-2024-1001"`).
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{n}"),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        RowId::Int(n)
    }
}

impl From<i32> for RowId {
    fn from(n: i32) -> Self {
        RowId::Int(n as i64)
    }
}

impl From<u32> for RowId {
    fn from(n: u32) -> Self {
        RowId::Int(n as i64)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::Text(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        RowId::Text(s)
    }
}

/// A record the table can display.
///
/// # Example
///
/// ```
/// use tabula::{Number, Row, RowId, Value};
///
/// struct Customer {
///     id: i64,
///     company: String,
///     sales: f64,
/// }
///
/// impl Row for Customer {
///     fn row_id(&self) -> RowId {
///         RowId::Int(self.id)
///     }
///
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "company" => Value::String(&self.company),
///             "sales" => Value::Number(Number::F64(self.sales)),
///             _ => Value::None,
///         }
///     }
///
///     fn field_names(&self) -> Vec<&str> {
///         vec!["company", "sales"]
///     }
/// }
/// ```
pub trait Row {
    /// Returns the row's identifier. Must be unique within a dataset and
    /// stable across renders.
    fn row_id(&self) -> RowId;

    /// Returns the value of a field, or [`Value::None`] if the field is
    /// missing or null.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Names of every field searched when no explicit search field list is
    /// configured.
    fn field_names(&self) -> Vec<&str>;

    /// Text of a field as matched by search and shown in plain cells.
    ///
    /// Defaults to [`Value::search_text`] of [`Row::field_value`]. Override it
    /// for fields that have a text form but no scalar [`Value`], such as lists.
    fn search_text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.field_value(field).search_text()
    }
}

/// JSON objects as returned by a REST backend.
///
/// The identifier is read from the `"id"` key: integers become
/// [`RowId::Int`], anything else [`RowId::Text`]. A row without an `"id"` key
/// gets the empty text id, so all such rows share one identity for selection;
/// datasets that need selection must carry ids.
///
/// Arrays and nested objects have no scalar [`Value`] and do not sort.
/// Arrays are still searchable: their text is the elements joined with `,`,
/// nested arrays flattened, nulls and objects left empty (`["a", null, 2]`
/// reads `"a,,2"`). A nested object field stays absent.
impl Row for serde_json::Map<String, serde_json::Value> {
    fn row_id(&self) -> RowId {
        match self.get("id") {
            Some(serde_json::Value::Number(n)) => match n.as_i64() {
                Some(i) => RowId::Int(i),
                None => RowId::Text(n.to_string()),
            },
            Some(serde_json::Value::String(s)) => RowId::Text(s.clone()),
            Some(other) => RowId::Text(other.to_string()),
            None => RowId::Text(String::new()),
        }
    }

    fn field_value(&self, field: &str) -> Value<'_> {
        match self.get(field) {
            Some(serde_json::Value::String(s)) => Value::String(s),
            Some(serde_json::Value::Bool(b)) => Value::Bool(*b),
            Some(serde_json::Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::I64(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::U64(u))
                } else {
                    n.as_f64()
                        .map(|f| Value::Number(Number::F64(f)))
                        .unwrap_or(Value::None)
                }
            }
            _ => Value::None,
        }
    }

    fn field_names(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }

    fn search_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.get(field) {
            Some(serde_json::Value::Array(items)) => {
                let mut text = String::new();
                join_array(items, &mut text);
                Some(Cow::Owned(text))
            }
            _ => self.field_value(field).search_text(),
        }
    }
}

fn join_array(items: &[serde_json::Value], out: &mut String) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match item {
            serde_json::Value::Null | serde_json::Value::Object(_) => {}
            serde_json::Value::String(s) => out.push_str(s),
            serde_json::Value::Array(nested) => join_array(nested, out),
            scalar => out.push_str(&scalar.to_string()),
        }
    }
}
