//! Output channel registry

use ahash::AHashMap;
use ts_core::{Element, Table, TableError};

/// One channel per table column, keyed by label.
///
/// A registry is never patched in place: `rebuild` produces a fresh one from
/// a table so channels cannot outlive the table they were derived from.
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    /// Channel names in table column order
    order: Vec<String>,
    /// Label -> column index
    index: AHashMap<String, usize>,
}

impl ChannelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry mirroring the table's column labels
    pub fn rebuild<ET: Element>(table: &Table<ET>) -> Self {
        let labels = table.column_labels();
        let mut index = AHashMap::with_capacity(labels.len());
        for (column, label) in labels.iter().enumerate() {
            index.insert(label.clone(), column);
        }

        Self {
            order: labels.to_vec(),
            index,
        }
    }

    /// Column index backing a channel
    pub fn resolve(&self, channel: &str) -> Result<usize, TableError> {
        self.index
            .get(channel)
            .copied()
            .ok_or_else(|| TableError::KeyNotFound(channel.to_string()))
    }

    pub fn contains(&self, channel: &str) -> bool {
        self.index.contains_key(channel)
    }

    /// Channel names in column order
    pub fn channels(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
