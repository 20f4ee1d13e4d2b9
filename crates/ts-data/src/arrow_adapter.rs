//! Conversion from in-memory Arrow record batches
//!
//! Loaders that already produce a `RecordBatch` can hand it over here; one
//! numeric column becomes the independent (time) column and every other
//! column becomes a dependent `f64` column, in schema order.

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use tracing::debug;
use ts_core::{Table, TableError};

use crate::DataError;

/// Build a scalar table from a record batch.
///
/// All columns must be numeric and free of nulls. Timestamps must be
/// non-decreasing.
pub fn table_from_record_batch(batch: &RecordBatch, time_column: &str) -> Result<Table<f64>, DataError> {
    let schema = batch.schema();
    let (time_index, _) = schema
        .column_with_name(time_column)
        .ok_or_else(|| TableError::KeyNotFound(time_column.to_string()))?;

    let times = to_f64_values(time_column, batch.column(time_index))?;

    let mut labels = Vec::with_capacity(batch.num_columns().saturating_sub(1));
    let mut columns = Vec::with_capacity(labels.capacity());
    for (index, field) in schema.fields().iter().enumerate() {
        if index == time_index {
            continue;
        }
        columns.push(to_f64_values(field.name(), batch.column(index))?);
        labels.push(field.name().clone());
    }

    let mut data = Vec::with_capacity(times.len() * columns.len());
    for row in 0..times.len() {
        data.extend(columns.iter().map(|column| column[row]));
    }

    debug!(rows = times.len(), columns = labels.len(), "Converted record batch");
    Ok(Table::new(times, labels, data)?)
}

fn to_f64_values(name: &str, array: &ArrayRef) -> Result<Vec<f64>, DataError> {
    if !array.data_type().is_numeric() {
        return Err(DataError::UnsupportedColumn {
            name: name.to_string(),
            reason: format!("expected a numeric column, found {}", array.data_type()),
        });
    }
    if array.null_count() > 0 {
        return Err(DataError::UnsupportedColumn {
            name: name.to_string(),
            reason: format!("{} null values", array.null_count()),
        });
    }

    let floats = cast(array, &DataType::Float64)?;
    let floats = floats
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| DataError::Other(format!("Column '{}' did not cast to Float64", name)))?;
    Ok(floats.values().to_vec())
}
