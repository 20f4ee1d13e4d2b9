//! Core abstractions for time-indexed table sources
//!
//! This crate holds the table model, the element arithmetic it relies on and
//! the interpolation engine that answers "value at time t" queries.

pub mod element;
pub mod interpolate;
pub mod output;
pub mod policy;
pub mod table;

use thiserror::Error;

// Re-export commonly used types
pub use element::Element;
pub use interpolate::{bracket, row_at, row_at_time, value_at, value_at_time, Bracket};
pub use output::{ChannelId, OutputKind, OutputProvider, OutputSpec, OutputValue, ALL_COLUMNS, COLUMN_OUTPUT};
pub use policy::TimestampPolicy;
pub use table::Table;

/// Errors raised by tables and the queries answered from them
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Table is empty")]
    EmptyTable,

    #[error("Time out of range: min = {min} max = {max} timestamp = {time}")]
    TimeOutOfRange {
        time: f64,
        min: f64,
        max: f64,
    },

    #[error("Key not found: '{0}'")]
    KeyNotFound(String),

    #[error("Duplicate column label: '{0}'")]
    DuplicateLabel(String),

    #[error("Shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
    },

    #[error("Timestamps not in order at row {index}: {current} follows {previous}")]
    NonMonotonicTimestamps {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("Timestamp at row {index} is not finite: {value}")]
    NonFiniteTimestamp {
        index: usize,
        value: f64,
    },

    #[error("Row index {index} out of range (rows: {num_rows})")]
    RowOutOfRange {
        index: usize,
        num_rows: usize,
    },

    #[error("Column index {index} out of range (columns: {num_columns})")]
    ColumnOutOfRange {
        index: usize,
        num_columns: usize,
    },
}
