//! Data input abstraction layer
//!
//! Readers materialize a batch of [`Record`]s from an external source. The
//! backend that executes the natural-language-derived query delivers rows
//! over a generic JSON contract; this layer turns that payload into the
//! uniform record sequence the inference engine consumes.
//!
//! # Architecture
//!
//! All readers implement the [`Reader`] trait, which provides:
//! - Source → `Vec<Record>` materialization
//! - Source-specific payload handling (envelopes, framing)
//!
//! # Example
//!
//! ```rust
//! use vizhint::reader::{JsonReader, Reader};
//!
//! let reader = JsonReader::from_text(r#"[{"name": "A", "amt": 10}]"#);
//! let records = reader.read().unwrap();
//! assert_eq!(records.len(), 1);
//! ```

use crate::record::Record;
use crate::Result;

pub mod json;

pub use json::JsonReader;

/// Trait for record-batch sources.
///
/// Readers take an external payload (JSON text, a file, stdin) and produce
/// the materialized record sequence consumed by [`crate::infer`].
pub trait Reader {
    /// Materialize the full record batch.
    ///
    /// # Errors
    ///
    /// Returns `VizhintError::ReaderError` if the payload cannot be parsed
    /// or does not contain a sequence of scalar-valued row objects, and
    /// `VizhintError::InputError` if the source itself cannot be read.
    fn read(&self) -> Result<Vec<Record>>;
}
