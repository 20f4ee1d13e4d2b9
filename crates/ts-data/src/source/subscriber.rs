//! Table change subscriber trait

/// Snapshot of a source right after its table was replaced
#[derive(Debug, Clone, PartialEq)]
pub struct TableChange {
    pub source_name: String,
    pub generation: u64,
    pub channels: Vec<String>,
    pub num_rows: usize,
}

/// Trait for components that need to respond to table replacement
pub trait TableSubscriber: Send + Sync {
    /// Called after a new table and its channels became visible
    fn on_table_change(&self, change: &TableChange);
}
