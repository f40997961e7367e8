//! Query Targets
//!
//! The document model the editor works on:
//!
//! - **Types**: [`QueryTarget`] and its filters, aggregators and post-aggregators
//! - **Kinds**: closed sets of type tags and their wire names
//! - **Fields**: number and list inputs that hold raw user text until coerced
//! - **Defaults**: values seeded into a freshly opened target
//!
//! # Example
//!
//! ```rust
//! use druidq::target::{Aggregator, QueryTarget};
//!
//! let target = QueryTarget::new()
//!     .with_datasource("wikipedia")
//!     .with_query_type("timeseries")
//!     .with_aggregator(Aggregator::count("rows"));
//!
//! let json = target.to_json_pretty().unwrap();
//! assert!(json.contains("\"druidDS\": \"wikipedia\""));
//! ```

mod defaults;
mod error;
mod fields;
mod kinds;
mod types;

pub use defaults::{EditorDefaults, DEFAULT_AGGREGATOR_TYPE, DEFAULT_FILTER_TYPE};
pub use error::{TargetError, TargetResult};
pub use fields::{ListInput, NumericInput};
pub(crate) use fields::has_text;
pub use kinds::{
    AggregatorType, ArithmeticFn, ArithmeticOrdering, FilterType, Granularity, PostAggregatorType,
    QueryType,
};
pub use types::{
    Aggregator, CurrentScan, CurrentSelect, FieldAccess, Filter, PostAggregator, QueryTarget,
};

use std::path::Path;

impl QueryTarget {
    /// Parse a target from JSON text
    pub fn from_json_str(json: &str) -> TargetResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> TargetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a target document from disk
    pub fn load(path: &Path) -> TargetResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TargetError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    /// Write the target document to disk
    pub fn save(&self, path: &Path) -> TargetResult<()> {
        let content = self.to_json_pretty()?;
        std::fs::write(path, content).map_err(|e| TargetError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("target.json");

        let target = QueryTarget::new()
            .with_datasource("wikipedia")
            .with_aggregator(Aggregator::count("rows"));
        target.save(&path).unwrap();

        let loaded = QueryTarget::load(&path).unwrap();
        assert_eq!(loaded, target);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = QueryTarget::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, TargetError::Io { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = QueryTarget::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, TargetError::Json(_)));
    }
}
