//! Sort stage.
//!
//! At most one sort is active. Missing values sort first when ascending and
//! last when descending. The sort is stable, so rows with equal keys keep
//! their filtered order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::row::Row;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the opposite direction.
    pub fn toggled(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active sort: a field key and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub dir: Dir,
}

impl SortConfig {
    pub fn asc(key: impl Into<String>) -> Self {
        SortConfig {
            key: key.into(),
            dir: Dir::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        SortConfig {
            key: key.into(),
            dir: Dir::Desc,
        }
    }

    /// The sort a header click on `key` produces.
    ///
    /// Clicking the active key while ascending flips to descending; every
    /// other click sorts ascending by `key`.
    pub fn next(current: Option<&SortConfig>, key: &str) -> SortConfig {
        match current {
            Some(active) if active.key == key && active.dir == Dir::Asc => SortConfig::desc(key),
            _ => SortConfig::asc(key),
        }
    }

    /// Compares two rows by this sort's key and direction.
    pub fn compare<R: Row>(&self, a: &R, b: &R) -> Ordering {
        let ordering = compare_values(&a.field_value(&self.key), &b.field_value(&self.key));
        self.dir.apply(ordering)
    }
}

/// Positional sortability rule.
///
/// The first column of a list view is usually the selection checkbox or
/// primary label and the last one holds row actions. By default neither can
/// drive sorting, whatever their descriptors declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortPolicy {
    pub lock_first: bool,
    pub lock_last: bool,
}

impl Default for SortPolicy {
    fn default() -> Self {
        SortPolicy {
            lock_first: true,
            lock_last: true,
        }
    }
}

impl SortPolicy {
    /// Sortability decided by column descriptors alone.
    pub fn unlocked() -> Self {
        SortPolicy {
            lock_first: false,
            lock_last: false,
        }
    }

    /// Whether the column at `index` of `len` columns is positionally locked.
    pub fn locks(self, index: usize, len: usize) -> bool {
        (self.lock_first && index == 0) || (self.lock_last && index + 1 == len)
    }
}

/// Natural (ascending) ordering of two cell values.
///
/// Absent values come before present ones. Values of different kinds are
/// grouped by kind so the order stays total; NaN sorts after every number.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a
            .compare(*b)
            .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan())),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::None => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::Timestamp(_) => 3,
        Value::String(_) => 4,
    }
}

/// Orders rows by `config`, returning them unchanged when no sort is active.
pub fn sort_rows<'a, R: Row>(mut rows: Vec<&'a R>, config: Option<&SortConfig>) -> Vec<&'a R> {
    if let Some(config) = config {
        rows.sort_by(|a, b| config.compare(*a, *b));
    }
    rows
}
