//! Table source configuration

use serde::{Deserialize, Serialize};
use ts_core::TimestampPolicy;

use crate::DataError;

/// Configuration for a table source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Name the source is known by in a host graph
    pub name: String,

    /// Ordering every held table must satisfy
    pub timestamp_policy: TimestampPolicy,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            name: "table_source".to_string(),
            timestamp_policy: TimestampPolicy::NonDecreasing,
        }
    }
}

impl SourceConfig {
    /// Create a config with a name and default policy
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the timestamp policy
    pub fn with_timestamp_policy(mut self, policy: TimestampPolicy) -> Self {
        self.timestamp_policy = policy;
        self
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SourceConfig::default();
        assert_eq!(config.name, "table_source");
        assert_eq!(config.timestamp_policy, TimestampPolicy::NonDecreasing);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SourceConfig::from_json(r#"{ "name": "markers" }"#).unwrap();
        assert_eq!(config, SourceConfig::named("markers"));

        let strict = SourceConfig::from_json(r#"{ "timestamp_policy": "strictly_increasing" }"#).unwrap();
        assert_eq!(strict.timestamp_policy, TimestampPolicy::StrictlyIncreasing);
        assert_eq!(strict.name, "table_source");
    }

    #[test]
    fn test_json_round_trip_and_errors() {
        let config = SourceConfig::named("grf").with_timestamp_policy(TimestampPolicy::Unchecked);
        let parsed = SourceConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);

        let err = SourceConfig::from_json(r#"{ "timestamp_policy": "sideways" }"#).unwrap_err();
        assert!(matches!(err, DataError::Config(_)));
    }
}
