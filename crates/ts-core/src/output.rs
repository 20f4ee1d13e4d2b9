//! Output seam consumed by a host computation graph
//!
//! A table source exposes two outputs: a single-valued `all_columns` output
//! carrying the full interpolated row, and a list output `column` with one
//! channel per table column. Hosts address channels by name and evaluate
//! them at an explicit time; any caching across evaluations is up to them.

use std::fmt;

use crate::{Element, TableError};

/// Name of the aggregate row output
pub const ALL_COLUMNS: &str = "all_columns";

/// Name of the per-column list output
pub const COLUMN_OUTPUT: &str = "column";

/// Whether an output carries one value or a list of channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Single,
    List,
}

/// Description of one output of a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub name: String,
    pub kind: OutputKind,
    /// Channel names for list outputs; empty for single outputs
    pub channels: Vec<String>,
}

/// Identifies what a host wants evaluated
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelId {
    /// The full row
    AllColumns,
    /// A single column, by label
    Column(String),
}

impl ChannelId {
    pub fn column(label: impl Into<String>) -> Self {
        ChannelId::Column(label.into())
    }

    /// Parse a channel path.
    ///
    /// `"all_columns"` names the row output and `"column:<label>"` names a
    /// column explicitly; any other string is taken as a column label.
    pub fn parse(path: &str) -> Self {
        if path == ALL_COLUMNS {
            return ChannelId::AllColumns;
        }
        match path.strip_prefix(COLUMN_OUTPUT).and_then(|rest| rest.strip_prefix(':')) {
            Some(label) => ChannelId::Column(label.to_string()),
            None => ChannelId::Column(path.to_string()),
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelId::AllColumns => write!(f, "{ALL_COLUMNS}"),
            ChannelId::Column(label) => write!(f, "{COLUMN_OUTPUT}:{label}"),
        }
    }
}

/// An evaluated output value
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue<ET> {
    Element(ET),
    Row(Vec<ET>),
}

impl<ET> OutputValue<ET> {
    pub fn into_element(self) -> Option<ET> {
        match self {
            OutputValue::Element(value) => Some(value),
            OutputValue::Row(_) => None,
        }
    }

    pub fn into_row(self) -> Option<Vec<ET>> {
        match self {
            OutputValue::Row(row) => Some(row),
            OutputValue::Element(_) => None,
        }
    }
}

/// A component whose outputs can be evaluated at a given time
pub trait OutputProvider<ET: Element>: Send + Sync {
    /// Outputs this provider currently exposes
    fn outputs(&self) -> Vec<OutputSpec>;

    /// Current channel names of the list output
    fn channels(&self) -> Vec<String>;

    /// Evaluate a channel at `time`
    fn evaluate(&self, time: f64, channel: &ChannelId) -> Result<OutputValue<ET>, TableError>;

    /// Name used to identify the provider in a graph
    fn source_name(&self) -> &str;
}
