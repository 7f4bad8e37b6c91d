//! Chart inference engine
//!
//! Determines whether a batch of records is chartable, extracts a label
//! axis and a numeric series, and recommends a chart kind.
//!
//! # Inference modes
//!
//! - **Standard mode**: at least one numeric column exists. The first
//!   textual column (or the first column overall) becomes the label axis
//!   and the first numeric column becomes the value series, one entry per
//!   record.
//! - **Counting mode**: no numeric column exists. The first column becomes
//!   the label axis and the series is a frequency count per distinct label,
//!   in first-encountered order.
//!
//! Inference is a pure function over the input slice: no mutation, no I/O,
//! and malformed cells degrade to `0.0` rather than failing the batch.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::record::{Record, Scalar};

// =============================================================================
// Chart Kinds
// =============================================================================

/// Renderable chart kinds.
///
/// Inference only ever recommends `Bar`, `Line`, or `Pie`; `Doughnut` and
/// `Area` exist for the user-chosen rendering path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Doughnut,
    Area,
}

impl ChartKind {
    /// Wire name used in renderer configurations and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
            Self::Area => "area",
        }
    }

    /// Whether this kind renders a part-of-whole circle (no value axis).
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::Pie | Self::Doughnut)
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(Self::Bar),
            "line" => Ok(Self::Line),
            "pie" => Ok(Self::Pie),
            "doughnut" => Ok(Self::Doughnut),
            "area" => Ok(Self::Area),
            other => Err(format!(
                "unknown chart kind '{}' (expected bar, line, pie, doughnut, or area)",
                other
            )),
        }
    }
}

// =============================================================================
// Output Types
// =============================================================================

/// A named numeric sequence, positionally aligned with the label axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Series name (the value column, or `"Count"` in counting mode)
    pub name: String,
    /// One value per label
    pub values: Vec<f64>,
}

/// Result of chart inference over a record batch.
///
/// Invariant: `labels.len() == series.values.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Label axis, one entry per record (standard mode) or per distinct
    /// category (counting mode)
    pub labels: Vec<String>,
    /// The numeric series aligned with `labels`
    pub series: Series,
    /// Column chosen for the label axis
    pub label_key: String,
    /// Column chosen for the value series; `None` in counting mode
    pub value_key: Option<String>,
    /// Cardinality-based default chart kind
    pub recommended: Option<ChartKind>,
}

impl ChartSeries {
    /// Number of data points
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the series has no data points
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether this is counting-mode output (frequency counts, no value column)
    pub fn is_counted(&self) -> bool {
        self.value_key.is_none()
    }
}

// =============================================================================
// Numeric Parsing
// =============================================================================

/// Lossless numeric parse: the whole string (surrounding whitespace allowed)
/// must be a finite float.
fn parse_numeric(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether a cell marks its column as numeric during classification.
fn is_numeric_cell(value: &Scalar) -> bool {
    match value {
        Scalar::Number(n) => n.is_finite(),
        Scalar::String(s) => parse_numeric(s).is_some(),
        _ => false,
    }
}

/// Coerce a value cell to f64, degrading to `0.0` on parse failure.
///
/// Best-effort visualization policy: one malformed cell never blocks the
/// rest of the batch.
fn coerce_value(value: Option<&Scalar>) -> f64 {
    match value {
        Some(Scalar::Number(n)) if n.is_finite() => *n,
        Some(Scalar::String(s)) => parse_numeric(s).unwrap_or_else(|| {
            debug!(cell = %s, "unparseable value cell coerced to 0");
            0.0
        }),
        _ => 0.0,
    }
}

// =============================================================================
// Inference
// =============================================================================

/// Infer a chartable series from a batch of uniform records.
///
/// Returns `None` when the data is not chartable: an empty batch, or a
/// schema with fewer than two columns. Column classification inspects only
/// the first record; later records are coerced on a best-effort basis.
///
/// # Example
///
/// ```rust
/// use vizhint::{infer, ChartKind, Record, Scalar};
///
/// let rows = vec![
///     Record::from_pairs([("name", Scalar::from("A")), ("amt", Scalar::from("10"))]),
///     Record::from_pairs([("name", Scalar::from("B")), ("amt", Scalar::from("20"))]),
///     Record::from_pairs([("name", Scalar::from("C")), ("amt", Scalar::from("30"))]),
/// ];
/// let chart = infer(&rows).unwrap();
/// assert_eq!(chart.series.values, vec![10.0, 20.0, 30.0]);
/// assert_eq!(chart.recommended, Some(ChartKind::Pie));
/// ```
pub fn infer(records: &[Record]) -> Option<ChartSeries> {
    let first = records.first()?;
    if first.len() < 2 {
        debug!(columns = first.len(), "fewer than 2 columns, not chartable");
        return None;
    }

    // Classify columns from the first record's values
    let mut numeric_keys: Vec<&str> = Vec::new();
    let mut text_keys: Vec<&str> = Vec::new();
    for (column, value) in first.iter() {
        if is_numeric_cell(value) {
            numeric_keys.push(column);
        } else {
            text_keys.push(column);
        }
    }

    if numeric_keys.is_empty() {
        return Some(count_occurrences(records, first));
    }

    // Standard mode: first textual column labels the axis, else fall back
    // to the first column even if numeric
    let label_key = text_keys
        .first()
        .copied()
        .or_else(|| first.columns().next())?;
    let value_key = numeric_keys[0];

    let labels: Vec<String> = records
        .iter()
        .map(|row| {
            row.get(label_key)
                .map_or_else(|| Scalar::Null.to_key_string(), Scalar::to_key_string)
        })
        .collect();
    let values: Vec<f64> = records
        .iter()
        .map(|row| coerce_value(row.get(value_key)))
        .collect();

    let recommended = recommend(distinct_count(&labels));
    debug!(
        label_key,
        value_key,
        rows = records.len(),
        kind = %recommended,
        "standard-mode inference"
    );

    Some(ChartSeries {
        labels,
        series: Series {
            name: value_key.to_string(),
            values,
        },
        label_key: label_key.to_string(),
        value_key: Some(value_key.to_string()),
        recommended: Some(recommended),
    })
}

/// Counting-mode fallback: no numeric column, so count occurrences of the
/// first column's values in first-encountered order.
fn count_occurrences(records: &[Record], first: &Record) -> ChartSeries {
    // first.len() >= 2 was checked by the caller
    let label_key = first.columns().next().unwrap_or_default();

    let mut counts: IndexMap<String, f64> = IndexMap::new();
    for row in records {
        let label = row
            .get(label_key)
            .map_or_else(|| Scalar::Null.to_key_string(), Scalar::to_key_string);
        *counts.entry(label).or_insert(0.0) += 1.0;
    }

    let recommended = recommend(counts.len());
    debug!(
        label_key,
        categories = counts.len(),
        kind = %recommended,
        "counting-mode inference"
    );

    let (labels, values): (Vec<String>, Vec<f64>) = counts.into_iter().unzip();
    ChartSeries {
        labels,
        series: Series {
            name: "Count".to_string(),
            values,
        },
        label_key: label_key.to_string(),
        value_key: None,
        recommended: Some(recommended),
    }
}

fn distinct_count(labels: &[String]) -> usize {
    labels.iter().collect::<HashSet<_>>().len()
}

/// Cardinality heuristic: low-cardinality categorical breakdowns suit pie
/// charts, high-cardinality ordered data suits line charts, everything else
/// defaults to bar.
fn recommend(distinct: usize) -> ChartKind {
    if (1..=5).contains(&distinct) {
        ChartKind::Pie
    } else if distinct > 15 {
        ChartKind::Line
    } else {
        ChartKind::Bar
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Scalar)]) -> Record {
        Record::from_pairs(pairs.iter().map(|(k, v)| (*k, v.clone())))
    }

    /// n rows with distinct labels and one numeric column
    fn distinct_rows(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                row(&[
                    ("label", Scalar::from(format!("item-{}", i))),
                    ("value", Scalar::from(i as f64)),
                ])
            })
            .collect()
    }

    #[test]
    fn test_empty_input_not_chartable() {
        assert_eq!(infer(&[]), None);
    }

    #[test]
    fn test_single_column_not_chartable() {
        let rows = vec![row(&[("only", Scalar::from(1.0))])];
        assert_eq!(infer(&rows), None);
    }

    #[test]
    fn test_standard_mode_string_numbers() {
        let rows = vec![
            row(&[("name", Scalar::from("A")), ("amt", Scalar::from("10"))]),
            row(&[("name", Scalar::from("B")), ("amt", Scalar::from("20"))]),
            row(&[("name", Scalar::from("C")), ("amt", Scalar::from("30"))]),
        ];
        let chart = infer(&rows).unwrap();
        assert_eq!(chart.labels, vec!["A", "B", "C"]);
        assert_eq!(chart.series.values, vec![10.0, 20.0, 30.0]);
        assert_eq!(chart.series.name, "amt");
        assert_eq!(chart.label_key, "name");
        assert_eq!(chart.value_key.as_deref(), Some("amt"));
        assert_eq!(chart.recommended, Some(ChartKind::Pie));
    }

    #[test]
    fn test_lengths_match_record_count() {
        let rows = distinct_rows(8);
        let chart = infer(&rows).unwrap();
        assert_eq!(chart.labels.len(), rows.len());
        assert_eq!(chart.series.values.len(), rows.len());
    }

    #[test]
    fn test_duplicate_labels_kept_in_standard_mode() {
        let rows = vec![
            row(&[("cat", Scalar::from("X")), ("v", Scalar::from(1.0))]),
            row(&[("cat", Scalar::from("X")), ("v", Scalar::from(2.0))]),
            row(&[("cat", Scalar::from("Y")), ("v", Scalar::from(3.0))]),
        ];
        let chart = infer(&rows).unwrap();
        assert_eq!(chart.labels, vec!["X", "X", "Y"]);
        assert_eq!(chart.series.values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_recommend_line_above_15_distinct() {
        let chart = infer(&distinct_rows(20)).unwrap();
        assert_eq!(chart.recommended, Some(ChartKind::Line));
    }

    #[test]
    fn test_recommend_bar_mid_cardinality() {
        let chart = infer(&distinct_rows(10)).unwrap();
        assert_eq!(chart.recommended, Some(ChartKind::Bar));
    }

    #[test]
    fn test_recommend_boundaries() {
        assert_eq!(infer(&distinct_rows(5)).unwrap().recommended, Some(ChartKind::Pie));
        assert_eq!(infer(&distinct_rows(6)).unwrap().recommended, Some(ChartKind::Bar));
        assert_eq!(infer(&distinct_rows(15)).unwrap().recommended, Some(ChartKind::Bar));
        assert_eq!(infer(&distinct_rows(16)).unwrap().recommended, Some(ChartKind::Line));
    }

    #[test]
    fn test_unparseable_value_degrades_to_zero() {
        let rows = vec![
            row(&[("name", Scalar::from("A")), ("amt", Scalar::from("10"))]),
            row(&[("name", Scalar::from("B")), ("amt", Scalar::from("abc"))]),
        ];
        let chart = infer(&rows).unwrap();
        assert_eq!(chart.series.values, vec![10.0, 0.0]);
    }

    #[test]
    fn test_null_and_missing_value_degrade_to_zero() {
        let rows = vec![
            row(&[("name", Scalar::from("A")), ("amt", Scalar::from(5.0))]),
            row(&[("name", Scalar::from("B")), ("amt", Scalar::Null)]),
            row(&[("name", Scalar::from("C"))]),
        ];
        let chart = infer(&rows).unwrap();
        assert_eq!(chart.series.values, vec![5.0, 0.0, 0.0]);
        assert_eq!(chart.labels, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_counting_mode_sums_to_record_count() {
        let rows = vec![
            row(&[("city", Scalar::from("Oslo")), ("tag", Scalar::from("a"))]),
            row(&[("city", Scalar::from("Bergen")), ("tag", Scalar::from("b"))]),
            row(&[("city", Scalar::from("Oslo")), ("tag", Scalar::from("c"))]),
            row(&[("city", Scalar::from("Oslo")), ("tag", Scalar::from("d"))]),
        ];
        let chart = infer(&rows).unwrap();
        assert!(chart.is_counted());
        assert_eq!(chart.series.name, "Count");
        assert_eq!(chart.labels, vec!["Oslo", "Bergen"]);
        assert_eq!(chart.series.values, vec![3.0, 1.0]);
        assert_eq!(chart.series.values.iter().sum::<f64>(), rows.len() as f64);
    }

    #[test]
    fn test_counting_mode_first_encountered_order() {
        let rows = vec![
            row(&[("k", Scalar::from("z")), ("t", Scalar::from("x"))]),
            row(&[("k", Scalar::from("a")), ("t", Scalar::from("x"))]),
            row(&[("k", Scalar::from("z")), ("t", Scalar::from("x"))]),
        ];
        let chart = infer(&rows).unwrap();
        assert_eq!(chart.labels, vec!["z", "a"]);
    }

    #[test]
    fn test_counting_mode_gets_recommendation() {
        let rows = vec![
            row(&[("k", Scalar::from("a")), ("t", Scalar::from("x"))]),
            row(&[("k", Scalar::from("b")), ("t", Scalar::from("x"))]),
        ];
        let chart = infer(&rows).unwrap();
        assert_eq!(chart.recommended, Some(ChartKind::Pie));
    }

    #[test]
    fn test_all_numeric_columns_uses_first_as_label() {
        let rows = vec![
            row(&[("x", Scalar::from(1.0)), ("y", Scalar::from(10.0))]),
            row(&[("x", Scalar::from(2.0)), ("y", Scalar::from(20.0))]),
        ];
        let chart = infer(&rows).unwrap();
        // Label falls back to the first column; value stays the first numeric
        assert_eq!(chart.label_key, "x");
        assert_eq!(chart.value_key.as_deref(), Some("x"));
        assert_eq!(chart.labels, vec!["1", "2"]);
        assert_eq!(chart.series.values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_boolean_column_is_textual() {
        let rows = vec![
            row(&[("flag", Scalar::from(true)), ("v", Scalar::from(7.0))]),
            row(&[("flag", Scalar::from(false)), ("v", Scalar::from(8.0))]),
        ];
        let chart = infer(&rows).unwrap();
        assert_eq!(chart.label_key, "flag");
        assert_eq!(chart.labels, vec!["true", "false"]);
        assert_eq!(chart.series.values, vec![7.0, 8.0]);
    }

    #[test]
    fn test_numeric_prefix_string_is_not_numeric() {
        // "10abc" is not a lossless float, so both columns are textual and
        // inference falls back to counting mode
        let rows = vec![
            row(&[("a", Scalar::from("10abc")), ("b", Scalar::from("x"))]),
            row(&[("a", Scalar::from("10abc")), ("b", Scalar::from("y"))]),
        ];
        let chart = infer(&rows).unwrap();
        assert!(chart.is_counted());
        assert_eq!(chart.labels, vec!["10abc"]);
        assert_eq!(chart.series.values, vec![2.0]);
    }

    #[test]
    fn test_idempotent() {
        let rows = distinct_rows(12);
        let a = infer(&rows).unwrap();
        let b = infer(&rows).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_input_not_mutated() {
        let rows = distinct_rows(3);
        let snapshot = rows.clone();
        let _ = infer(&rows);
        assert_eq!(rows, snapshot);
    }

    #[test]
    fn test_chart_kind_parse_and_display() {
        for kind in [
            ChartKind::Bar,
            ChartKind::Line,
            ChartKind::Pie,
            ChartKind::Doughnut,
            ChartKind::Area,
        ] {
            assert_eq!(kind.as_str().parse::<ChartKind>().unwrap(), kind);
        }
        assert!("scatter".parse::<ChartKind>().is_err());
    }
}
