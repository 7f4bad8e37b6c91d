/*!
# vizhint - Chart inference for tabular query results

Given the rows of a tabular query result (as produced by a SQL backend),
vizhint decides whether the data is chartable, extracts a label axis and a
numeric series, recommends a chart kind, and can emit a complete renderer
configuration for a user-chosen kind.

## Example

```rust
use vizhint::{infer, ChartKind, Record, Scalar};

let rows = vec![
    Record::from_pairs([("name", Scalar::from("A")), ("amt", Scalar::from(10.0))]),
    Record::from_pairs([("name", Scalar::from("B")), ("amt", Scalar::from(20.0))]),
];

let chart = infer(&rows).expect("two columns, one numeric");
assert_eq!(chart.labels, vec!["A", "B"]);
assert_eq!(chart.series.values, vec![10.0, 20.0]);
assert_eq!(chart.recommended, Some(ChartKind::Pie));
```

## Architecture

The crate is a small pipeline:

- **Input** → [`reader`] materializes records from a JSON payload
  (bare row array or backend response envelope)
- **Inference** → [`infer()`] classifies columns and builds a
  [`ChartSeries`] with a recommended [`ChartKind`]
- **Output** → [`writer`] turns a series plus a chosen kind into a
  renderer configuration object

## Core Components

- [`record`] - Scalar values and ordered row records
- [`infer`] - Column classification and chart recommendation
- [`reader`] - Data input abstraction layer
- [`writer`] - Renderer configuration output layer
*/

pub mod infer;
pub mod reader;
pub mod record;
pub mod writer;

// Re-export key types for convenience
pub use infer::{infer, ChartKind, ChartSeries, Series};
pub use record::{Record, Scalar};

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum VizhintError {
    #[error("Input error: {0}")]
    InputError(String),

    #[error("Data source error: {0}")]
    ReaderError(String),

    #[error("Output generation error: {0}")]
    WriterError(String),
}

pub type Result<T> = std::result::Result<T, VizhintError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
