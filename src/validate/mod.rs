//! Target Validation
//!
//! Checks a [`QueryTarget`](crate::target::QueryTarget) and reports problems
//! as a flat field -> message map:
//!
//! - **Registry**: type name -> validator tables per category
//! - **Query**: field rules per query type (limit, threshold, groupBy, ...)
//! - **Drafts**: rules for the filter/aggregator/post-aggregator being edited
//! - **Target**: the orchestrator that runs everything in order
//!
//! Validation never returns `Err`. Messages are meant for the person editing
//! the query, and validators coerce raw inputs (numbers, delimited lists) in
//! place as they pass.
//!
//! # Example
//!
//! ```rust
//! use druidq::target::QueryTarget;
//! use druidq::validate::{validate_target, ActiveDrafts, ValidatorRegistry};
//!
//! let registry = ValidatorRegistry::new();
//! let mut target = QueryTarget::new().with_query_type("search");
//! let errors = validate_target(&registry, &mut target, ActiveDrafts::default());
//!
//! assert_eq!(errors.get("queryType"), Some("Unknown query type: search."));
//! ```

mod drafts;
mod errors;
mod query;
mod registry;
mod target;

pub use drafts::{
    validate_approx_histogram_fold_aggregator, validate_arithmetic_post_aggregator,
    validate_count_aggregator, validate_javascript_filter, validate_max_post_aggregator,
    validate_min_post_aggregator, validate_quantile_post_aggregator, validate_regex_filter,
    validate_selector_filter, validate_simple_aggregator, validate_simple_post_aggregator,
    validate_theta_sketch_aggregator,
};
pub use errors::{keys, ErrorMap};
pub use query::{
    validate_group_by_query, validate_limit, validate_max_data_points, validate_order_by,
    validate_scan_query, validate_threshold, validate_timeseries_query, validate_top_n_query,
};
pub use registry::{
    AggregatorValidator, FilterValidator, PostAggregatorValidator, QueryTypeValidator,
    ValidatorRegistry,
};
pub use target::{validate_target, ActiveDrafts};
