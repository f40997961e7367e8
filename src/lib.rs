//! # druidq
//!
//! Editor core for native Druid query targets: a typed target document, the
//! validation rules for every query, filter, aggregator and post-aggregator
//! type, and the stateful add/edit/remove workflow a query panel drives.
//!
//! ## Modules
//!
//! - [`target`]: The query target document and its type tags
//! - [`validate`]: Validator registry and whole-target validation
//! - [`editor`]: Draft staging and the editing session
//! - [`datasource`]: Broker lookups for typeahead inputs
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use druidq::editor::QueryEditor;
//! use druidq::target::{Aggregator, QueryTarget};
//!
//! let mut editor = QueryEditor::default();
//! let mut target = QueryTarget::new().with_datasource("wikipedia");
//!
//! // New targets default to groupBy, which needs a groupBy list
//! let errors = editor.init(&mut target);
//! assert!(errors.contains("groupBy"));
//!
//! target.group_by = Some("page".into());
//! target.aggregators.push(Aggregator::count("rows"));
//! assert!(editor.target_blur(&mut target).is_empty());
//! ```

pub mod config;
pub mod datasource;
pub mod editor;
pub mod target;
pub mod validate;

// Re-export top-level types for convenience
pub use config::{generate_default_config, Config, ConfigError, LoggingConfig};

pub use datasource::{
    BrokerClient, BrokerConfig, Datasource, DatasourceError, DatasourceResult,
    DimensionsAndMetrics, FilterValuesResponse, LookupCache, Lookups, TimeRange, TopNBucket,
};

pub use editor::{DraftKind, QueryEditor, RefreshHook, StagingModes};

pub use target::{
    Aggregator, EditorDefaults, Filter, ListInput, NumericInput, PostAggregator, QueryTarget,
    TargetError, TargetResult,
};

pub use validate::{validate_target, ActiveDrafts, ErrorMap, ValidatorRegistry};
