//! Validator registry
//!
//! Maps each type name to its validator, one table per category. The tables are
//! filled once with the built-in types and never change afterwards. Callers
//! must check membership before dispatching; an unknown name has no validator
//! and is reported by the caller instead.

use super::drafts::*;
use super::errors::ErrorMap;
use super::query::*;
use crate::target::{
    Aggregator, AggregatorType, Filter, FilterType, PostAggregator, PostAggregatorType,
    QueryTarget, QueryType,
};
use std::collections::HashMap;

/// Checks the fields a query type needs; returns false on any failure
pub type QueryTypeValidator = fn(&mut QueryTarget, &mut ErrorMap) -> bool;
/// Checks a filter draft
pub type FilterValidator = fn(&Filter) -> Option<String>;
/// Checks an aggregator draft
pub type AggregatorValidator = Box<dyn Fn(&Aggregator) -> Option<String> + Send + Sync>;
/// Checks a post-aggregator draft, deriving `fields` where needed
pub type PostAggregatorValidator = fn(&mut PostAggregator) -> Option<String>;

/// One category of validators, in registration order
struct Validators<V> {
    order: Vec<&'static str>,
    by_name: HashMap<&'static str, V>,
}

impl<V> Validators<V> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    fn register(&mut self, name: &'static str, validator: V) {
        if self.by_name.insert(name, validator).is_none() {
            self.order.push(name);
        }
    }

    fn get(&self, name: &str) -> Option<&V> {
        self.by_name.get(name)
    }

    fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    fn names(&self) -> &[&'static str] {
        &self.order
    }
}

/// Validators for every query, filter, aggregator and post-aggregator type
pub struct ValidatorRegistry {
    query_types: Validators<QueryTypeValidator>,
    filters: Validators<FilterValidator>,
    aggregators: Validators<AggregatorValidator>,
    post_aggregators: Validators<PostAggregatorValidator>,
}

impl ValidatorRegistry {
    /// Create a registry holding the built-in types
    pub fn new() -> Self {
        let mut registry = Self {
            query_types: Validators::new(),
            filters: Validators::new(),
            aggregators: Validators::new(),
            post_aggregators: Validators::new(),
        };
        registry.register_builtins();
        registry
    }

    fn register_builtins(&mut self) {
        for &kind in QueryType::ALL {
            let validator: QueryTypeValidator = match kind {
                QueryType::Timeseries => validate_timeseries_query,
                QueryType::GroupBy => validate_group_by_query,
                QueryType::TopN => validate_top_n_query,
                QueryType::Scan => validate_scan_query,
            };
            self.query_types.register(kind.as_str(), validator);
        }

        for &kind in FilterType::ALL {
            let validator: FilterValidator = match kind {
                FilterType::Selector => validate_selector_filter,
                FilterType::Regex => validate_regex_filter,
                FilterType::Javascript => validate_javascript_filter,
            };
            self.filters.register(kind.as_str(), validator);
        }

        for &kind in AggregatorType::ALL {
            let validator: AggregatorValidator = match kind {
                AggregatorType::Count => Box::new(validate_count_aggregator),
                AggregatorType::ApproxHistogramFold => {
                    Box::new(validate_approx_histogram_fold_aggregator)
                }
                AggregatorType::ThetaSketch => Box::new(validate_theta_sketch_aggregator),
                _ => Box::new(move |aggregator: &Aggregator| {
                    validate_simple_aggregator(kind.as_str(), aggregator)
                }),
            };
            self.aggregators.register(kind.as_str(), validator);
        }

        for &kind in PostAggregatorType::ALL {
            let validator: PostAggregatorValidator = match kind {
                PostAggregatorType::Arithmetic => validate_arithmetic_post_aggregator,
                PostAggregatorType::Max => validate_max_post_aggregator,
                PostAggregatorType::Min => validate_min_post_aggregator,
                PostAggregatorType::Quantile => validate_quantile_post_aggregator,
            };
            self.post_aggregators.register(kind.as_str(), validator);
        }
    }

    pub fn is_valid_query_type(&self, name: &str) -> bool {
        self.query_types.contains(name)
    }

    pub fn is_valid_filter_type(&self, name: &str) -> bool {
        self.filters.contains(name)
    }

    pub fn is_valid_aggregator_type(&self, name: &str) -> bool {
        self.aggregators.contains(name)
    }

    pub fn is_valid_post_aggregator_type(&self, name: &str) -> bool {
        self.post_aggregators.contains(name)
    }

    pub fn query_validator(&self, name: &str) -> Option<QueryTypeValidator> {
        self.query_types.get(name).copied()
    }

    pub fn filter_validator(&self, name: &str) -> Option<FilterValidator> {
        self.filters.get(name).copied()
    }

    pub fn aggregator_validator(&self, name: &str) -> Option<&AggregatorValidator> {
        self.aggregators.get(name)
    }

    pub fn post_aggregator_validator(&self, name: &str) -> Option<PostAggregatorValidator> {
        self.post_aggregators.get(name).copied()
    }

    /// Query type names in picker order
    pub fn query_types(&self) -> &[&'static str] {
        self.query_types.names()
    }

    /// Filter type names in picker order
    pub fn filter_types(&self) -> &[&'static str] {
        self.filters.names()
    }

    /// Aggregator type names in picker order
    pub fn aggregator_types(&self) -> &[&'static str] {
        self.aggregators.names()
    }

    /// Post-aggregator type names in picker order
    pub fn post_aggregator_types(&self) -> &[&'static str] {
        self.post_aggregators.names()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("query_types", &self.query_types.names())
            .field("filters", &self.filters.names())
            .field("aggregators", &self.aggregators.names())
            .field("post_aggregators", &self.post_aggregators.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_membership() {
        let registry = ValidatorRegistry::new();

        assert!(registry.is_valid_query_type("topN"));
        assert!(!registry.is_valid_query_type("search"));
        assert!(registry.is_valid_filter_type("regex"));
        assert!(!registry.is_valid_filter_type("bound"));
        assert!(registry.is_valid_aggregator_type("hyperUnique"));
        assert!(!registry.is_valid_aggregator_type("javascript"));
        assert!(registry.is_valid_post_aggregator_type("quantile"));
        assert!(!registry.is_valid_post_aggregator_type("constant"));
    }

    #[test]
    fn test_names_in_declaration_order() {
        let registry = ValidatorRegistry::new();

        assert_eq!(registry.query_types(), &["timeseries", "groupBy", "topN", "scan"]);
        assert_eq!(registry.filter_types(), &["selector", "regex", "javascript"]);
        assert_eq!(registry.aggregator_types().len(), 19);
        assert_eq!(registry.aggregator_types()[0], "count");
        assert_eq!(registry.aggregator_types()[18], "thetaSketch");
        assert_eq!(registry.post_aggregator_types(), &["arithmetic", "max", "min", "quantile"]);
    }

    #[test]
    fn test_partial_aggregator_validators_carry_kind() {
        let registry = ValidatorRegistry::new();
        let agg = Aggregator::new("doubleMax").named("peak");

        let validator = registry.aggregator_validator("doubleMax").unwrap();
        assert_eq!(
            validator(&agg).as_deref(),
            Some("Must provide a metric name for doubleMax aggregator.")
        );

        let validator = registry.aggregator_validator("cardinality").unwrap();
        assert_eq!(
            validator(&Aggregator::new("cardinality")).as_deref(),
            Some("Must provide an output name for cardinality aggregator.")
        );
    }

    #[test]
    fn test_timeseries_is_noop() {
        let registry = ValidatorRegistry::new();
        let mut target = QueryTarget::new();
        let mut errs = ErrorMap::new();

        let validator = registry.query_validator("timeseries").unwrap();
        assert!(validator(&mut target, &mut errs));
        assert!(errs.is_empty());
    }
}
