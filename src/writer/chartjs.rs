//! Chart.js configuration writer
//!
//! Converts an inferred series and a chosen chart kind into a Chart.js
//! config object, ready to be passed to `new Chart(ctx, config)` by a
//! web front-end.
//!
//! # Mapping Strategy
//!
//! - `area` renders as a `line` chart with fill-under-curve enabled
//! - Pie/doughnut charts color each slice from a fixed 7-color palette,
//!   cycled by index; all other kinds use one series color
//! - Border colors are the fill colors forced to full opacity
//! - Non-circular kinds pin the value axis at zero

use serde_json::{json, Value};

use crate::infer::{ChartKind, ChartSeries};
use crate::writer::Writer;
use crate::Result;

/// Fixed series palette, as (r, g, b) triples. Fills use alpha 0.8,
/// borders the same color at full opacity.
const PALETTE: [(u8, u8, u8); 7] = [
    (37, 99, 235),
    (16, 185, 129),
    (239, 68, 68),
    (245, 158, 11),
    (139, 92, 246),
    (236, 72, 153),
    (14, 165, 233),
];

/// Fill alpha for dataset backgrounds
const FILL_ALPHA: f64 = 0.8;

/// Fill color at palette position `idx` (cycled).
fn fill_color(idx: usize) -> String {
    let (r, g, b) = PALETTE[idx % PALETTE.len()];
    format!("rgba({}, {}, {}, {})", r, g, b, FILL_ALPHA)
}

/// Border variant: the same palette entry at full opacity.
fn border_color(idx: usize) -> String {
    let (r, g, b) = PALETTE[idx % PALETTE.len()];
    format!("rgba({}, {}, {}, 1)", r, g, b)
}

/// Chart.js config writer
pub struct ChartJsWriter;

impl ChartJsWriter {
    /// Create a new Chart.js writer with default settings
    pub fn new() -> Self {
        Self
    }

    /// Dataset color channels for the chosen kind.
    ///
    /// Circular kinds get one color per data point; everything else a
    /// single color for the whole series.
    fn colors(&self, series: &ChartSeries, kind: ChartKind) -> (Value, Value) {
        if kind.is_circular() {
            let fills: Vec<String> = (0..series.len()).map(fill_color).collect();
            let borders: Vec<String> = (0..series.len()).map(border_color).collect();
            (json!(fills), json!(borders))
        } else {
            (json!(fill_color(0)), json!(border_color(0)))
        }
    }

    /// Axis configuration: value axis pinned at zero, except for circular
    /// kinds which have no axes at all.
    fn scales(&self, kind: ChartKind) -> Value {
        if kind.is_circular() {
            json!({})
        } else {
            json!({ "y": { "beginAtZero": true } })
        }
    }
}

impl Default for ChartJsWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for ChartJsWriter {
    type Output = Value;

    fn write(&self, series: &ChartSeries, kind: ChartKind) -> Result<Self::Output> {
        let (background, border) = self.colors(series, kind);

        // Area is a line-mode rendering with fill enabled
        let mark = match kind {
            ChartKind::Area => ChartKind::Line.as_str(),
            other => other.as_str(),
        };

        Ok(json!({
            "type": mark,
            "data": {
                "labels": series.labels,
                "datasets": [{
                    "label": series.series.name,
                    "data": series.series.values,
                    "backgroundColor": background,
                    "borderColor": border,
                    "borderWidth": 2,
                    "fill": kind == ChartKind::Area,
                }],
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "animation": { "duration": 400 },
                "interaction": { "mode": "index", "intersect": false },
                "plugins": {
                    "legend": { "display": true, "position": "top" },
                    "title": { "display": false },
                },
                "scales": self.scales(kind),
            },
        }))
    }
}
