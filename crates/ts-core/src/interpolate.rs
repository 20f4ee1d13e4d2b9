//! Linear interpolation over a table's independent column
//!
//! Queries never extrapolate: a time outside `[first, last]` is an error.
//! A time equal to a stored timestamp returns that row verbatim, so boundary
//! and exact-match queries carry no floating-point drift.

use crate::{Element, Table, TableError};

/// Where a query time falls within the independent column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bracket {
    /// The time matches a stored row (or a boundary) exactly
    Exact(usize),
    /// The time lies strictly between two adjacent rows
    Between {
        prev: usize,
        next: usize,
        /// `(time - prev_time) / (next_time - prev_time)`, in `(0, 1)`
        fraction: f64,
    },
}

/// Locate the rows bracketing `time`.
///
/// Uses a lower-bound binary search: the first row with timestamp `>= time`.
/// With duplicate timestamps an exact match resolves to the first duplicate,
/// and the interpolation denominator is always positive because the rows
/// around a non-matching time satisfy `prev_time < time < next_time`.
pub fn bracket<ET: Element>(table: &Table<ET>, time: f64) -> Result<Bracket, TableError> {
    let (first, last) = table.time_range().ok_or(TableError::EmptyTable)?;

    // Written so that a NaN query fails the range check too
    if !(time >= first && time <= last) {
        return Err(TableError::TimeOutOfRange {
            time,
            min: first,
            max: last,
        });
    }

    let times = table.independent_column();
    let lower = times.partition_point(|&t| t < time);

    if lower == 0 {
        return Ok(Bracket::Exact(0));
    }
    if lower == times.len() {
        return Ok(Bracket::Exact(times.len() - 1));
    }
    if times[lower] == time {
        return Ok(Bracket::Exact(lower));
    }

    let prev_time = times[lower - 1];
    let next_time = times[lower];
    Ok(Bracket::Between {
        prev: lower - 1,
        next: lower,
        fraction: (time - prev_time) / (next_time - prev_time),
    })
}

/// Value of one column at `time`
pub fn value_at_time<ET: Element>(table: &Table<ET>, time: f64, column: usize) -> Result<ET, TableError> {
    let position = bracket(table, time)?;
    value_at(table, position, column)
}

/// Full row at `time`, one element per column
pub fn row_at_time<ET: Element>(table: &Table<ET>, time: f64) -> Result<Vec<ET>, TableError> {
    let position = bracket(table, time)?;
    Ok(row_at(table, position))
}

/// Value of one column at an already resolved position.
///
/// `position` must come from [`bracket`] on the same table.
pub fn value_at<ET: Element>(table: &Table<ET>, position: Bracket, column: usize) -> Result<ET, TableError> {
    table.check_column(column)?;

    Ok(match position {
        Bracket::Exact(row) => table.row_unchecked(row)[column],
        Bracket::Between { prev, next, fraction } => ET::lerp(
            table.row_unchecked(prev)[column],
            table.row_unchecked(next)[column],
            fraction,
        ),
    })
}

/// Full row at an already resolved position.
///
/// `position` must come from [`bracket`] on the same table.
pub fn row_at<ET: Element>(table: &Table<ET>, position: Bracket) -> Vec<ET> {
    match position {
        Bracket::Exact(row) => table.row_unchecked(row).to_vec(),
        Bracket::Between { prev, next, fraction } => table
            .row_unchecked(prev)
            .iter()
            .zip(table.row_unchecked(next))
            .map(|(&p, &n)| ET::lerp(p, n, fraction))
            .collect(),
    }
}
