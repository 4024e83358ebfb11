//! District Metrics
//!
//! A district record is a bag of named values as delivered by the upstream
//! data service. Counts may arrive as JSON numbers or as numeric strings, so
//! every read used for ordering goes through [`coerce_integer`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Reserved district name for unclassified cases. Always ordered last.
pub const UNKNOWN_DISTRICT: &str = "Unknown";

/// District name → metrics for one parent region.
///
/// Enumeration order carries no meaning; display order always comes from
/// [`crate::sort::sort_districts`].
pub type DistrictMap = BTreeMap<String, DistrictMetrics>;

/// Statistics for a single district
///
/// Fields are kept exactly as received so that values not used for sorting
/// pass through to the display unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistrictMetrics {
    fields: BTreeMap<String, Value>,
}

impl DistrictMetrics {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a field
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Set a field in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Raw field value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Field coerced to an integer.
    ///
    /// Returns `None` when the field is missing or holds no leading digits;
    /// the comparator orders `None` below every parsed value.
    pub fn metric(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(coerce_integer)
    }

    /// Confirmed case count, if parseable
    pub fn confirmed(&self) -> Option<i64> {
        self.metric("confirmed")
    }

    /// Text shown in a table cell for `key`
    pub fn display(&self, key: &str) -> String {
        match self.fields.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Names of all fields on this record
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Coerce a JSON value to an integer.
///
/// Numbers are truncated toward zero, strings go through
/// [`parse_integer_prefix`]. Booleans, nulls, arrays and objects yield `None`.
pub fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_integer_prefix(s),
        _ => None,
    }
}

/// Parse the leading integer of a string.
///
/// Leading whitespace is skipped, one optional sign is accepted, then the
/// longest run of ASCII digits is taken: `" 42 cases"` → 42, `"12abc"` → 12,
/// `"abc"` → `None`. Values beyond the `i64` range saturate.
pub fn parse_integer_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return None;
    }

    let mut value: i64 = 0;
    for b in digits.bytes() {
        let digit = i64::from(b - b'0');
        value = match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(v) => v,
            None => return Some(if negative { i64::MIN } else { i64::MAX }),
        };
    }

    Some(if negative { -value } else { value })
}
