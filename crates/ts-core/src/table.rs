//! Time-indexed table storage

use ahash::AHashSet;
use tracing::trace;

use crate::{Element, TableError, TimestampPolicy};

/// An ordered set of timestamped rows with named columns.
///
/// Values are stored row-major: element `(row, col)` lives at
/// `row * num_columns + col`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<ET: Element> {
    /// Independent (time) column
    independent: Vec<f64>,
    /// Dependent column labels, unique
    labels: Vec<String>,
    /// Row-major element matrix
    data: Vec<ET>,
    /// Ordering rule the independent column was validated against
    policy: TimestampPolicy,
}

impl<ET: Element> Table<ET> {
    /// Create a table whose timestamps must be non-decreasing
    pub fn new(independent: Vec<f64>, labels: Vec<String>, data: Vec<ET>) -> Result<Self, TableError> {
        Self::with_policy(independent, labels, data, TimestampPolicy::default())
    }

    /// Create a table validated against a specific timestamp policy
    pub fn with_policy(
        independent: Vec<f64>,
        labels: Vec<String>,
        data: Vec<ET>,
        policy: TimestampPolicy,
    ) -> Result<Self, TableError> {
        check_labels(&labels)?;

        let expected = independent.len() * labels.len();
        if data.len() != expected {
            return Err(TableError::ShapeMismatch { expected, actual: data.len() });
        }

        policy.check(&independent)?;

        trace!(rows = independent.len(), columns = labels.len(), "Validated table");

        Ok(Self {
            independent,
            labels,
            data,
            policy,
        })
    }

    /// Create a table with labels but no rows
    pub fn empty(labels: Vec<String>) -> Result<Self, TableError> {
        Self::new(Vec::new(), labels, Vec::new())
    }

    /// Build a table from `(time, row)` pairs
    pub fn from_rows<I>(labels: Vec<String>, rows: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (f64, Vec<ET>)>,
    {
        let mut table = Self::empty(labels)?;
        for (time, row) in rows {
            table.append_row(time, &row)?;
        }
        Ok(table)
    }

    /// Append a row at the end of the table.
    ///
    /// The new timestamp is checked against the last one using the table's
    /// policy; on failure the table is left unchanged.
    pub fn append_row(&mut self, time: f64, row: &[ET]) -> Result<(), TableError> {
        if row.len() != self.labels.len() {
            return Err(TableError::ShapeMismatch {
                expected: self.labels.len(),
                actual: row.len(),
            });
        }

        let checked = match self.independent.last() {
            Some(&previous) => self.policy.check(&[previous, time]),
            None => self.policy.check(&[time]),
        };
        let index = self.num_rows();
        checked.map_err(|err| match err {
            TableError::NonMonotonicTimestamps { previous, current, .. } => {
                TableError::NonMonotonicTimestamps { index, previous, current }
            }
            TableError::NonFiniteTimestamp { value, .. } => TableError::NonFiniteTimestamp { index, value },
            other => other,
        })?;

        self.independent.push(time);
        self.data.extend_from_slice(row);
        Ok(())
    }

    pub fn num_rows(&self) -> usize {
        self.independent.len()
    }

    pub fn num_columns(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.independent.is_empty()
    }

    pub fn column_labels(&self) -> &[String] {
        &self.labels
    }

    /// The timestamps, one per row
    pub fn independent_column(&self) -> &[f64] {
        &self.independent
    }

    pub fn policy(&self) -> TimestampPolicy {
        self.policy
    }

    /// First and last timestamp, if the table has rows
    pub fn time_range(&self) -> Option<(f64, f64)> {
        match (self.independent.first(), self.independent.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }

    /// Index of the column with the given label
    pub fn column_index(&self, label: &str) -> Result<usize, TableError> {
        self.labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| TableError::KeyNotFound(label.to_string()))
    }

    pub fn element_at(&self, row: usize, column: usize) -> Result<ET, TableError> {
        self.check_column(column)?;
        let values = self.row_at(row)?;
        Ok(values[column])
    }

    pub fn row_at(&self, row: usize) -> Result<&[ET], TableError> {
        if row >= self.num_rows() {
            return Err(TableError::RowOutOfRange {
                index: row,
                num_rows: self.num_rows(),
            });
        }
        let width = self.num_columns();
        Ok(&self.data[row * width..(row + 1) * width])
    }

    /// All values of one column, in row order
    pub fn column(&self, label: &str) -> Result<Vec<ET>, TableError> {
        let column = self.column_index(label)?;
        let width = self.num_columns();
        Ok(self.data.iter().skip(column).step_by(width).copied().collect())
    }

    /// Row whose timestamp is closest to `time`; ties go to the earlier row
    pub fn nearest_row_index(&self, time: f64) -> Result<usize, TableError> {
        if self.is_empty() {
            return Err(TableError::EmptyTable);
        }

        let lower = self.independent.partition_point(|&t| t < time);
        if lower == 0 {
            return Ok(0);
        }
        if lower == self.num_rows() {
            return Ok(self.num_rows() - 1);
        }

        let before = time - self.independent[lower - 1];
        let after = self.independent[lower] - time;
        if after < before {
            Ok(lower)
        } else {
            Ok(lower - 1)
        }
    }

    pub(crate) fn check_column(&self, column: usize) -> Result<(), TableError> {
        if column >= self.num_columns() {
            return Err(TableError::ColumnOutOfRange {
                index: column,
                num_columns: self.num_columns(),
            });
        }
        Ok(())
    }

    /// Row slice for an index already known to be in range
    pub(crate) fn row_unchecked(&self, row: usize) -> &[ET] {
        let width = self.num_columns();
        &self.data[row * width..(row + 1) * width]
    }
}

fn check_labels(labels: &[String]) -> Result<(), TableError> {
    let mut seen = AHashSet::with_capacity(labels.len());
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(TableError::DuplicateLabel(label.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Table<f64> {
        Table::new(
            vec![0.0, 1.0, 2.0],
            labels(&["a", "b"]),
            vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0],
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let table = sample();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.column_labels(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.independent_column(), &[0.0, 1.0, 2.0]);
        assert_eq!(table.column_index("b").unwrap(), 1);
        assert_eq!(table.element_at(2, 1).unwrap(), 30.0);
        assert_eq!(table.row_at(1).unwrap(), &[2.0, 20.0]);
        assert_eq!(table.column("a").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(table.time_range(), Some((0.0, 2.0)));
    }

    #[test]
    fn test_missing_label_and_bad_indices() {
        let table = sample();
        assert_eq!(table.column_index("c"), Err(TableError::KeyNotFound("c".to_string())));
        assert_eq!(
            table.row_at(3),
            Err(TableError::RowOutOfRange { index: 3, num_rows: 3 })
        );
        assert_eq!(
            table.element_at(0, 2),
            Err(TableError::ColumnOutOfRange { index: 2, num_columns: 2 })
        );
    }

    #[test]
    fn test_construction_validation() {
        let dup = Table::<f64>::new(vec![0.0], labels(&["a", "a"]), vec![1.0, 2.0]);
        assert_eq!(dup, Err(TableError::DuplicateLabel("a".to_string())));

        let shape = Table::<f64>::new(vec![0.0, 1.0], labels(&["a"]), vec![1.0]);
        assert_eq!(shape, Err(TableError::ShapeMismatch { expected: 2, actual: 1 }));

        let order = Table::<f64>::new(vec![1.0, 0.0], labels(&["a"]), vec![1.0, 2.0]);
        assert!(matches!(order, Err(TableError::NonMonotonicTimestamps { index: 1, .. })));

        let unchecked = Table::<f64>::with_policy(
            vec![1.0, 0.0],
            labels(&["a"]),
            vec![1.0, 2.0],
            TimestampPolicy::Unchecked,
        );
        assert!(unchecked.is_ok());
    }

    #[test]
    fn test_append_row_keeps_table_on_failure() {
        let mut table = sample();
        assert!(table.append_row(3.0, &[4.0, 40.0]).is_ok());
        assert_eq!(table.num_rows(), 4);

        assert!(table.append_row(2.5, &[5.0, 50.0]).is_err());
        assert!(table.append_row(4.0, &[5.0]).is_err());
        assert_eq!(
            table.append_row(f64::INFINITY, &[5.0, 50.0]),
            Err(TableError::NonFiniteTimestamp { index: 4, value: f64::INFINITY })
        );
        assert_eq!(table.num_rows(), 4);
        assert_eq!(table.row_at(3).unwrap(), &[4.0, 40.0]);
    }

    #[test]
    fn test_from_rows_with_vectors() {
        let table = Table::from_rows(
            labels(&["marker"]),
            vec![
                (0.0, vec![DVec3::ZERO]),
                (1.0, vec![DVec3::X]),
            ],
        )
        .unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.element_at(1, 0).unwrap(), DVec3::X);
    }

    #[test]
    fn test_empty_and_zero_column_tables() {
        let empty = Table::<f64>::empty(labels(&["a"])).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.time_range(), None);
        assert_eq!(empty.nearest_row_index(0.0), Err(TableError::EmptyTable));

        let no_columns = Table::<f64>::new(vec![0.0, 1.0], Vec::new(), Vec::new()).unwrap();
        assert_eq!(no_columns.num_rows(), 2);
        assert_eq!(no_columns.row_at(1).unwrap(), &[] as &[f64]);
    }

    #[test]
    fn test_nearest_row_index() {
        let table = sample();
        assert_eq!(table.nearest_row_index(-5.0).unwrap(), 0);
        assert_eq!(table.nearest_row_index(0.4).unwrap(), 0);
        assert_eq!(table.nearest_row_index(0.5).unwrap(), 0);
        assert_eq!(table.nearest_row_index(0.6).unwrap(), 1);
        assert_eq!(table.nearest_row_index(2.0).unwrap(), 2);
        assert_eq!(table.nearest_row_index(9.0).unwrap(), 2);
    }
}
