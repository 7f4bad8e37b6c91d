//! Record and scalar value types
//!
//! This module defines the input data model: a [`Record`] is one row of a
//! tabular result set, an ordered mapping from column name to a [`Scalar`]
//! cell value. The first record in a batch defines the schema; later
//! records are not re-validated against it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =============================================================================
// Scalar Values
// =============================================================================

/// One cell value of a tabular result set.
///
/// Untagged serde representation, so JSON scalars map directly:
/// `null` / `true` / `42` / `"text"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

/// Format number for display (remove trailing zeros for integers)
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

impl Scalar {
    /// Convert to f64 for numeric calculations.
    ///
    /// Only `Number` converts; strings are handled separately by the
    /// inference engine's lossless parse.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Convert to string form for labels and frequency-table keys.
    ///
    /// Integral numbers drop the decimal point (`25.0` → `"25"`).
    pub fn to_key_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Boolean(b) => b.to_string(),
            Self::Null => "null".to_string(),
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert to a serde_json::Value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Number(n) => serde_json::json!(n),
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::Null => serde_json::Value::Null,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_key_string())
    }
}

// =============================================================================
// Records
// =============================================================================

/// One row of a tabular result set: an ordered column name → value mapping.
///
/// Column order is preserved, so "first column" and "first numeric column"
/// are well-defined for inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Record(IndexMap<String, Scalar>);

impl Record {
    /// Create a new empty Record
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Build a record from (column, value) pairs, preserving order.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Scalar)>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Insert a column value, appending the column if new.
    pub fn insert(&mut self, column: impl Into<String>, value: Scalar) {
        self.0.insert(column.into(), value);
    }

    /// Get a cell by column name.
    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.0.get(column)
    }

    /// Column names in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// (column, value) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns in this record
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the record has no columns
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Scalar)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
