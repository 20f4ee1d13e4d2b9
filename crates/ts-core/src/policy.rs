//! Ordering rules for the independent column

use serde::{Deserialize, Serialize};

use crate::TableError;

/// How strictly the independent (time) column must be ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    /// Accept any sequence; interpolation results are unspecified if unsorted
    Unchecked,
    /// Each timestamp must be >= the one before it (duplicates allowed)
    #[default]
    NonDecreasing,
    /// Each timestamp must be > the one before it
    StrictlyIncreasing,
}

impl TimestampPolicy {
    /// Validate a timestamp column against this policy.
    ///
    /// Both ordered policies reject NaN and infinite timestamps, which would
    /// turn an in-range interpolation into NaN.
    pub fn check(&self, timestamps: &[f64]) -> Result<(), TableError> {
        let strict = match self {
            TimestampPolicy::Unchecked => return Ok(()),
            TimestampPolicy::NonDecreasing => false,
            TimestampPolicy::StrictlyIncreasing => true,
        };

        if let Some(index) = timestamps.iter().position(|t| !t.is_finite()) {
            return Err(TableError::NonFiniteTimestamp {
                index,
                value: timestamps[index],
            });
        }

        for (offset, pair) in timestamps.windows(2).enumerate() {
            let (previous, current) = (pair[0], pair[1]);
            let ordered = if strict { current > previous } else { current >= previous };
            if !ordered {
                return Err(TableError::NonMonotonicTimestamps {
                    index: offset + 1,
                    previous,
                    current,
                });
            }
        }
        Ok(())
    }

    /// Whether a table accepted under `other` is also acceptable under `self`
    pub fn is_satisfied_by(&self, other: TimestampPolicy) -> bool {
        self.rank() <= other.rank()
    }

    fn rank(&self) -> u8 {
        match self {
            TimestampPolicy::Unchecked => 0,
            TimestampPolicy::NonDecreasing => 1,
            TimestampPolicy::StrictlyIncreasing => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_decreasing_allows_duplicates() {
        assert!(TimestampPolicy::NonDecreasing.check(&[0.0, 1.0, 1.0, 2.0]).is_ok());
        assert!(TimestampPolicy::StrictlyIncreasing.check(&[0.0, 1.0, 1.0]).is_err());
    }

    #[test]
    fn test_rejects_decreasing_and_nan() {
        let err = TimestampPolicy::NonDecreasing.check(&[0.0, 2.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            TableError::NonMonotonicTimestamps { index: 2, previous: 2.0, current: 1.0 }
        );
        assert!(TimestampPolicy::NonDecreasing.check(&[0.0, f64::NAN]).is_err());
        assert!(TimestampPolicy::NonDecreasing.check(&[f64::NAN]).is_err());
        assert!(TimestampPolicy::Unchecked.check(&[3.0, f64::NAN, 1.0]).is_ok());
    }

    #[test]
    fn test_rejects_infinite_timestamps() {
        assert_eq!(
            TimestampPolicy::NonDecreasing.check(&[f64::NEG_INFINITY, 0.0]),
            Err(TableError::NonFiniteTimestamp { index: 0, value: f64::NEG_INFINITY })
        );
        assert_eq!(
            TimestampPolicy::StrictlyIncreasing.check(&[0.0, 1.0, f64::INFINITY]),
            Err(TableError::NonFiniteTimestamp { index: 2, value: f64::INFINITY })
        );
        assert!(TimestampPolicy::Unchecked.check(&[f64::NEG_INFINITY, 0.0]).is_ok());
    }

    #[test]
    fn test_policy_strength() {
        assert!(TimestampPolicy::NonDecreasing.is_satisfied_by(TimestampPolicy::StrictlyIncreasing));
        assert!(!TimestampPolicy::StrictlyIncreasing.is_satisfied_by(TimestampPolicy::NonDecreasing));
        assert!(TimestampPolicy::Unchecked.is_satisfied_by(TimestampPolicy::Unchecked));
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&TimestampPolicy::StrictlyIncreasing).unwrap();
        assert_eq!(json, "\"strictly_increasing\"");
        let parsed: TimestampPolicy = serde_json::from_str("\"unchecked\"").unwrap();
        assert_eq!(parsed, TimestampPolicy::Unchecked);
    }
}
