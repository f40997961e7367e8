//! Validation error map
//!
//! Validation never fails with an `Err`: every problem is a user-correctable
//! message keyed by the field (or draft) it belongs to.

use serde::Serialize;
use std::collections::BTreeMap;

/// Keys used in the error map
pub mod keys {
    pub const DRUID_DS: &str = "druidDS";
    pub const QUERY_TYPE: &str = "queryType";
    pub const CUSTOM_GRANULARITY: &str = "customGranularity";
    pub const MAX_DATA_POINTS: &str = "maxDataPoints";
    pub const LIMIT: &str = "limit";
    pub const THRESHOLD: &str = "threshold";
    pub const GROUP_BY: &str = "groupBy";
    pub const DIMENSION: &str = "dimension";
    pub const DRUID_METRIC: &str = "druidMetric";
    pub const AGGREGATORS: &str = "aggregators";
    pub const CURRENT_FILTER: &str = "currentFilter";
    pub const CURRENT_AGGREGATOR: &str = "currentAggregator";
    pub const CURRENT_POST_AGGREGATOR: &str = "currentPostAggregator";
}

/// Field name -> message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<String, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, replacing any earlier one
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}
