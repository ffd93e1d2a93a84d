//! Runtime cell values.
//!
//! The [`Value`] enum is what a [`Row`](crate::Row) hands back for a field.
//! Search matches against [`Value::search_text`], sorting compares values
//! with [`compare_values`](crate::compare_values).

use std::borrow::Cow;
use std::cmp::Ordering;

/// Runtime value of a row field, borrowed from the row.
///
/// # Example
///
/// ```
/// use tabula::{Number, Value};
///
/// struct Invoice {
///     number: String,
///     total: f64,
/// }
///
/// fn value<'a>(invoice: &'a Invoice, field: &str) -> Value<'a> {
///     match field {
///         "number" => Value::String(&invoice.number),
///         "total" => Value::Number(Number::F64(invoice.total)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Field missing, null, or not representable.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is the absent value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Canonical text used for search matching and plain cell rendering.
    ///
    /// Returns `None` for the absent value.
    pub fn search_text(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(*s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Timestamp(t) => Some(Cow::Owned(t.0.to_string())),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::None => None,
        }
    }
}

/// Numeric value preserving the source precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers exactly, handling mixed types.
    ///
    /// Integers are never rounded through `f64`, so `2^53 + 1` stays above
    /// `2^53` whichever representation the other side uses. Returns `None`
    /// when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (Some(a), None) => compare_int_float(a, other.to_f64()),
            (None, Some(b)) => compare_int_float(b, self.to_f64()).map(Ordering::reverse),
            (None, None) => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    fn as_i128(self) -> Option<i128> {
        match self {
            Number::I64(n) => Some(i128::from(n)),
            Number::U64(n) => Some(i128::from(n)),
            Number::F64(_) => None,
        }
    }
}

// 2^64 and -2^63: every I64/U64 lies in [MIN_INT, MAX_INT).
const MAX_INT: f64 = 18_446_744_073_709_551_616.0;
const MIN_INT: f64 = -9_223_372_036_854_775_808.0;

fn compare_int_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= MAX_INT {
        return Some(Ordering::Less);
    }
    if float < MIN_INT {
        return Some(Ordering::Greater);
    }
    // in range, so the integral part converts without loss
    let whole = float.trunc();
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)),
        ordering => Some(ordering),
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

/// Timestamp as milliseconds since Unix epoch.
///
/// Dates coming from the API as ISO strings already sort lexically and can be
/// exposed as [`Value::String`]; this type is for callers that hold parsed
/// times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a timestamp from seconds since Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs * 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_text_canonical_forms() {
        assert_eq!(Value::String("Hello").search_text().as_deref(), Some("Hello"));
        assert_eq!(Value::Number(Number::I64(42)).search_text().as_deref(), Some("42"));
        assert_eq!(
            Value::Number(Number::F64(12450.0)).search_text().as_deref(),
            Some("12450")
        );
        assert_eq!(
            Value::Number(Number::F64(3120.5)).search_text().as_deref(),
            Some("3120.5")
        );
        assert_eq!(Value::Bool(true).search_text().as_deref(), Some("true"));
        assert_eq!(
            Value::Timestamp(Timestamp::from_secs(2)).search_text().as_deref(),
            Some("2000")
        );
        assert_eq!(Value::None.search_text(), None);
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(Number::I64(5).compare(Number::U64(10)), Some(Ordering::Less));
        assert_eq!(Number::I64(5).compare(Number::F64(5.0)), Some(Ordering::Equal));
        assert_eq!(
            Number::U64(10).compare(Number::F64(5.5)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn mixed_comparison_is_exact_beyond_f64_precision() {
        let two_53 = 9_007_199_254_740_992_i64;
        let float = Number::F64(9_007_199_254_740_992.0);

        assert_eq!(Number::I64(two_53 + 1).compare(float), Some(Ordering::Greater));
        assert_eq!(Number::I64(two_53).compare(float), Some(Ordering::Equal));
        assert_eq!(float.compare(Number::I64(two_53 + 1)), Some(Ordering::Less));
        assert_eq!(
            Number::U64(u64::MAX).compare(Number::F64(18_446_744_073_709_551_616.0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(i64::MIN).compare(Number::F64(-1e300)),
            Some(Ordering::Greater)
        );
        assert_eq!(Number::I64(i64::MAX).compare(Number::U64(u64::MAX)), Some(Ordering::Less));
    }

    #[test]
    fn mixed_comparison_respects_fractions() {
        assert_eq!(Number::I64(2).compare(Number::F64(2.5)), Some(Ordering::Less));
        assert_eq!(Number::I64(3).compare(Number::F64(2.5)), Some(Ordering::Greater));
        assert_eq!(Number::I64(-1).compare(Number::F64(-0.5)), Some(Ordering::Less));
        assert_eq!(Number::I64(-1).compare(Number::F64(-1.5)), Some(Ordering::Greater));
        assert_eq!(Number::I64(0).compare(Number::F64(-0.0)), Some(Ordering::Equal));
        assert_eq!(
            Number::U64(1).compare(Number::F64(f64::INFINITY)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn number_nan_is_incomparable() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
        assert_eq!(Number::I64(1).compare(Number::F64(f64::NAN)), None);
    }

    #[test]
    fn extractors() {
        assert_eq!(Value::String("x").as_str(), Some("x"));
        assert_eq!(Value::String("x").as_number(), None);
        assert_eq!(Value::Number(Number::U64(3)).as_number(), Some(Number::U64(3)));
        assert!(Value::None.is_none());
    }
}
