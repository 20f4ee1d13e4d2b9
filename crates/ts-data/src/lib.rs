//! Table-backed data sources exposed as output channels

pub mod arrow_adapter;
pub mod channels;
pub mod config;
pub mod source;

use arrow::error::ArrowError;
use thiserror::Error;
use ts_core::TableError;

// Re-exports
pub use arrow_adapter::table_from_record_batch;
pub use channels::ChannelRegistry;
pub use config::SourceConfig;
pub use source::{ScalarTableSource, TableChange, TableSource, TableSubscriber, Vec3TableSource};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Arrow error: {0}")]
    Arrow(ArrowError),

    #[error("Unsupported column '{name}': {reason}")]
    UnsupportedColumn {
        name: String,
        reason: String,
    },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<ArrowError> for DataError {
    fn from(error: ArrowError) -> Self {
        DataError::Arrow(error)
    }
}
