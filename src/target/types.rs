//! Query target types
//!
//! A [`QueryTarget`] is the document the editor mutates and the broker
//! eventually receives. Field names on the wire are camelCase and must match
//! what the datasource backend reads, so every struct here renames
//! accordingly. Keys the editor does not own are kept in `extra` and written
//! back untouched.

use super::defaults::{DEFAULT_AGGREGATOR_TYPE, DEFAULT_FILTER_TYPE};
use super::fields::{ListInput, NumericInput};
use super::kinds::{AggregatorType, ArithmeticFn, ArithmeticOrdering, FilterType, PostAggregatorType};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The query under edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTarget {
    /// Native query type (`timeseries`, `groupBy`, `topN`, `scan`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,

    /// Datasource the query runs against
    #[serde(rename = "druidDS", default, skip_serializing_if = "Option::is_none")]
    pub druid_ds: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub filters: Vec<Filter>,
    #[serde(default = "Filter::default_draft", deserialize_with = "null_as_draft")]
    pub current_filter: Filter,

    #[serde(default, deserialize_with = "null_as_default")]
    pub aggregators: Vec<Aggregator>,
    #[serde(default = "Aggregator::default_draft", deserialize_with = "null_as_draft")]
    pub current_aggregator: Aggregator,

    #[serde(default, deserialize_with = "null_as_default")]
    pub post_aggregators: Vec<PostAggregator>,
    #[serde(default = "PostAggregator::default_draft", deserialize_with = "null_as_draft")]
    pub current_post_aggregator: PostAggregator,

    #[serde(default, deserialize_with = "null_as_default")]
    pub select_dimensions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub select_metrics: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_select: CurrentSelect,

    #[serde(default, deserialize_with = "null_as_default")]
    pub scan_columns: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_scan: CurrentScan,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_granularity: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub should_override_granularity: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_data_points: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_string_bytes: Option<NumericInput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<ListInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<ListInput>,

    /// topN dimension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
    /// topN metric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub druid_metric: Option<String>,

    /// Keys owned by the host (refId, hide, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Hosts write `null` for fields they never set
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like [`null_as_default`], falling back to the fresh draft shape
fn null_as_draft<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Draft,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_else(T::fresh))
}

trait Draft {
    fn fresh() -> Self;
}

impl Draft for Filter {
    fn fresh() -> Self {
        Filter::default_draft()
    }
}

impl Draft for Aggregator {
    fn fresh() -> Self {
        Aggregator::default_draft()
    }
}

impl Draft for PostAggregator {
    fn fresh() -> Self {
        PostAggregator::default_draft()
    }
}

impl Default for QueryTarget {
    fn default() -> Self {
        Self {
            query_type: None,
            druid_ds: None,
            filters: Vec::new(),
            current_filter: Filter::default_draft(),
            aggregators: Vec::new(),
            current_aggregator: Aggregator::default_draft(),
            post_aggregators: Vec::new(),
            current_post_aggregator: PostAggregator::default_draft(),
            select_dimensions: Vec::new(),
            select_metrics: Vec::new(),
            current_select: CurrentSelect::default(),
            scan_columns: Vec::new(),
            current_scan: CurrentScan::default(),
            custom_granularity: None,
            should_override_granularity: false,
            max_data_points: None,
            limit: None,
            threshold: None,
            max_string_bytes: None,
            order_by: None,
            group_by: None,
            dimension: None,
            druid_metric: None,
            extra: Map::new(),
        }
    }
}

impl QueryTarget {
    /// Create an empty target with default-shaped drafts
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the datasource
    pub fn with_datasource(mut self, name: impl Into<String>) -> Self {
        self.druid_ds = Some(name.into());
        self
    }

    /// Set the query type
    pub fn with_query_type(mut self, query_type: impl Into<String>) -> Self {
        self.query_type = Some(query_type.into());
        self
    }

    /// Append a committed aggregator
    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregators.push(aggregator);
        self
    }

    /// Whether the query type is `scan`
    pub fn is_scan(&self) -> bool {
        self.query_type.as_deref() == Some("scan")
    }
}

/// A dimension filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
    /// Selector value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Regex pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Javascript predicate source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Filter {
    /// Create an empty filter of the given type
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Fresh draft: `{type: "selector"}`
    pub fn default_draft() -> Self {
        Self::new(DEFAULT_FILTER_TYPE)
    }

    /// Selector filter matching `dimension == value`
    pub fn selector(dimension: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            dimension: Some(dimension.into()),
            value: Some(value.into()),
            ..Self::new(FilterType::Selector.as_str())
        }
    }

    /// Regex filter on a dimension
    pub fn regex(dimension: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            dimension: Some(dimension.into()),
            pattern: Some(pattern.into()),
            ..Self::new(FilterType::Regex.as_str())
        }
    }

    /// Javascript filter on a dimension
    pub fn javascript(dimension: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            dimension: Some(dimension.into()),
            function: Some(function.into()),
            ..Self::new(FilterType::Javascript.as_str())
        }
    }
}

/// An aggregator definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregator {
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Output name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Input metric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// Type-specific settings (resolution, numBuckets, size, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Aggregator {
    /// Create an empty aggregator of the given type
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Fresh draft: `{type: "count"}`
    pub fn default_draft() -> Self {
        Self::new(DEFAULT_AGGREGATOR_TYPE)
    }

    /// Count aggregator with an output name
    pub fn count(name: impl Into<String>) -> Self {
        Self::new(AggregatorType::Count.as_str()).named(name)
    }

    /// Aggregator reading `field_name` into `name`
    pub fn simple(kind: AggregatorType, name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            field_name: Some(field_name.into()),
            ..Self::new(kind.as_str()).named(name)
        }
    }

    /// Set the output name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A post-aggregator definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAggregator {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Aggregator read by max/min/quantile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// Aggregators combined by arithmetic, as typed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_names: Option<ListInput>,
    /// Field accessors derived from `field_names`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldAccess>>,
    #[serde(rename = "fn", default, skip_serializing_if = "Option::is_none")]
    pub func: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<NumericInput>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PostAggregator {
    /// Create an empty post-aggregator of the given type
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Fresh draft: `{type: "arithmetic", fn: "+", ordering: "null"}`
    pub fn default_draft() -> Self {
        Self {
            func: Some(ArithmeticFn::Plus.as_str().to_string()),
            ordering: Some(ArithmeticOrdering::Null.as_str().to_string()),
            ..Self::new(PostAggregatorType::Arithmetic.as_str())
        }
    }

    /// Arithmetic post-aggregator over comma-separated aggregator names
    pub fn arithmetic(name: impl Into<String>, func: ArithmeticFn, field_names: &str) -> Self {
        Self {
            name: Some(name.into()),
            func: Some(func.as_str().to_string()),
            field_names: Some(ListInput::from(field_names)),
            ..Self::new(PostAggregatorType::Arithmetic.as_str())
        }
    }

    /// max/min/quantile post-aggregator reading one aggregator
    pub fn simple(kind: PostAggregatorType, name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            field_name: Some(field_name.into()),
            ..Self::new(kind.as_str())
        }
    }
}

/// `{type: "fieldAccess", fieldName}` accessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAccess {
    #[serde(rename = "type")]
    pub kind: String,
    pub field_name: String,
}

impl FieldAccess {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            kind: "fieldAccess".to_string(),
            field_name: field_name.into(),
        }
    }
}

/// Draft dimension/metric names for select lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSelect {
    #[serde(default)]
    pub dimension: String,
    #[serde(default)]
    pub metric: String,
}

/// Draft column name for scan queries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentScan {
    #[serde(default)]
    pub column: String,
}
