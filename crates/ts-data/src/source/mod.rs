//! Table source component

mod subscriber;

pub use subscriber::{TableChange, TableSubscriber};

use std::sync::{Arc, Weak};

use glam::DVec3;
use parking_lot::RwLock;
use tracing::{debug, info};
use ts_core::{
    bracket, row_at, value_at, ChannelId, Element, OutputKind, OutputProvider, OutputSpec, OutputValue, Table,
    TableError, ALL_COLUMNS, COLUMN_OUTPUT,
};

use crate::channels::ChannelRegistry;
use crate::config::SourceConfig;

/// Source holding `f64` samples
pub type ScalarTableSource = TableSource<f64>;

/// Source holding 3-vector samples
pub type Vec3TableSource = TableSource<DVec3>;

/// Table and the channels derived from it, always swapped together
struct SourceState<ET: Element> {
    table: Arc<Table<ET>>,
    registry: ChannelRegistry,
    generation: u64,
}

/// A data source answering time queries from a held table.
///
/// Each column is exposed as a channel of the `column` output and the full
/// row as the `all_columns` output. Replacing the table rebuilds the channel
/// set under the same write lock, so a query always sees a table together
/// with the channels built from it.
pub struct TableSource<ET: Element> {
    config: SourceConfig,
    state: Arc<RwLock<SourceState<ET>>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn TableSubscriber>>>>,
}

impl<ET: Element> TableSource<ET> {
    /// Create a source holding `table`, with default configuration
    pub fn new(table: Table<ET>) -> Result<Self, TableError> {
        Self::with_config(table, SourceConfig::default())
    }

    /// Create a source holding `table`
    pub fn with_config(table: Table<ET>, config: SourceConfig) -> Result<Self, TableError> {
        validate(&config, &table)?;
        let registry = ChannelRegistry::rebuild(&table);

        debug!(
            source = %config.name,
            rows = table.num_rows(),
            columns = registry.len(),
            "Created table source"
        );

        Ok(Self {
            config,
            state: Arc::new(RwLock::new(SourceState {
                table: Arc::new(table),
                registry,
                generation: 0,
            })),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        })
    }

    /// Replace the held table and rebuild its channels.
    ///
    /// On error the previous table stays in place.
    pub fn set_table(&self, table: Table<ET>) -> Result<(), TableError> {
        validate(&self.config, &table)?;
        let registry = ChannelRegistry::rebuild(&table);

        let mut state = self.state.write();
        state.table = Arc::new(table);
        state.registry = registry;
        state.generation += 1;

        let change = TableChange {
            source_name: self.config.name.clone(),
            generation: state.generation,
            channels: state.registry.channels().to_vec(),
            num_rows: state.table.num_rows(),
        };
        drop(state);

        info!(
            source = %change.source_name,
            generation = change.generation,
            rows = change.num_rows,
            columns = change.channels.len(),
            "Replaced table"
        );

        self.notify_subscribers(&change);
        Ok(())
    }

    /// The table currently held
    pub fn table(&self) -> Arc<Table<ET>> {
        Arc::clone(&self.state.read().table)
    }

    /// Value of the channel `channel` at `time`
    pub fn query_column(&self, time: f64, channel: &str) -> Result<ET, TableError> {
        let state = self.state.read();
        let position = bracket(&state.table, time)?;
        let column = state.registry.resolve(channel)?;
        value_at(&state.table, position, column)
    }

    /// Full row at `time`
    pub fn query_row(&self, time: f64) -> Result<Vec<ET>, TableError> {
        let state = self.state.read();
        let position = bracket(&state.table, time)?;
        Ok(row_at(&state.table, position))
    }

    /// Current channel names, in column order
    pub fn channels(&self) -> Vec<String> {
        self.state.read().registry.channels().to_vec()
    }

    /// Number of table replacements since construction
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Add a subscriber notified after each table replacement
    pub fn add_subscriber(&self, subscriber: Arc<dyn TableSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    fn notify_subscribers(&self, change: &TableChange) {
        let live: Vec<Arc<dyn TableSubscriber>> = {
            let mut subscribers = self.subscribers.write();

            // Remove any dead weak references
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        // Called without the lock so subscribers may re-enter the source
        for subscriber in live {
            subscriber.on_table_change(change);
        }
    }
}

impl<ET: Element> OutputProvider<ET> for TableSource<ET> {
    fn outputs(&self) -> Vec<OutputSpec> {
        vec![
            OutputSpec {
                name: ALL_COLUMNS.to_string(),
                kind: OutputKind::Single,
                channels: Vec::new(),
            },
            OutputSpec {
                name: COLUMN_OUTPUT.to_string(),
                kind: OutputKind::List,
                channels: self.channels(),
            },
        ]
    }

    fn channels(&self) -> Vec<String> {
        TableSource::channels(self)
    }

    fn evaluate(&self, time: f64, channel: &ChannelId) -> Result<OutputValue<ET>, TableError> {
        match channel {
            ChannelId::AllColumns => self.query_row(time).map(OutputValue::Row),
            ChannelId::Column(label) => self.query_column(time, label).map(OutputValue::Element),
        }
    }

    fn source_name(&self) -> &str {
        self.name()
    }
}

/// Re-check the table's timestamps when the source demands a stricter
/// ordering than the table was built with
fn validate<ET: Element>(config: &SourceConfig, table: &Table<ET>) -> Result<(), TableError> {
    if config.timestamp_policy.is_satisfied_by(table.policy()) {
        return Ok(());
    }
    config.timestamp_policy.check(table.independent_column())
}
