//! Renderer configuration output layer
//!
//! Writers take an inferred [`ChartSeries`] plus a user-chosen
//! [`ChartKind`] and produce a configuration object for an actual
//! rendering surface. The crate never draws pixels itself; the caller
//! hands the configuration to a charting runtime.
//!
//! # Example
//!
//! ```rust
//! use vizhint::{infer, ChartKind, Record, Scalar};
//! use vizhint::writer::{ChartJsWriter, Writer};
//!
//! let rows = vec![
//!     Record::from_pairs([("name", Scalar::from("A")), ("amt", Scalar::from(10.0))]),
//!     Record::from_pairs([("name", Scalar::from("B")), ("amt", Scalar::from(20.0))]),
//! ];
//! let chart = infer(&rows).unwrap();
//!
//! let writer = ChartJsWriter::new();
//! let config = writer.write(&chart, ChartKind::Bar).unwrap();
//! assert_eq!(config["type"], "bar");
//! ```

use crate::infer::{ChartKind, ChartSeries};
use crate::Result;

pub mod chartjs;

pub use chartjs::ChartJsWriter;

/// Trait for renderer configuration writers.
///
/// # Associated Types
///
/// * `Output` - The type returned by `write()`. Use `serde_json::Value`
///   for JSON configs, `String` for templated output, etc.
pub trait Writer {
    /// The output type produced by this writer.
    type Output;

    /// Generate a renderer configuration for a series and chosen kind.
    ///
    /// # Errors
    ///
    /// Returns `VizhintError::WriterError` if the series cannot be
    /// expressed in this writer's output format.
    fn write(&self, series: &ChartSeries, kind: ChartKind) -> Result<Self::Output>;
}
