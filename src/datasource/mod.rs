//! Datasource lookups
//!
//! The editor's typeahead inputs need three things from the backend: the list
//! of datasources, the dimensions and metrics of one datasource, and the top
//! values of a dimension. [`Datasource`] is that seam; [`BrokerClient`] talks
//! to a Druid broker over HTTP and [`Lookups`] derives the picker lists,
//! optionally through a [`LookupCache`].

mod broker;
mod cache;
mod lookup;

pub use broker::{BrokerClient, BrokerConfig};
pub use cache::LookupCache;
pub use lookup::Lookups;

use crate::target::QueryTarget;
use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Backend queried by the editor's typeahead inputs
#[async_trait]
pub trait Datasource: Send + Sync {
    /// Names of all datasources
    async fn list_data_sources(&self) -> DatasourceResult<Vec<String>>;

    /// Columns of one datasource
    async fn get_dimensions_and_metrics(&self, datasource: &str) -> DatasourceResult<DimensionsAndMetrics>;

    /// Top values of the draft filter's dimension matching `query`
    async fn get_filter_values(
        &self,
        target: &QueryTarget,
        range: &TimeRange,
        query: &str,
    ) -> DatasourceResult<FilterValuesResponse>;
}

/// Columns of a datasource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionsAndMetrics {
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<String>,
}

/// Result of a filter value lookup, shaped like a topN response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterValuesResponse {
    #[serde(default)]
    pub data: Vec<TopNBucket>,
}

/// One time bucket of a topN result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopNBucket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub result: Vec<Map<String, Value>>,
}

/// Dashboard time range a lookup is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// The range ending now and spanning `span`, or `None` if the start
    /// falls outside the representable dates
    pub fn last(span: Duration) -> Option<Self> {
        let to = Utc::now();
        let from = to.checked_sub_signed(span)?;
        Some(Self { from, to })
    }

    /// ISO-8601 interval as Druid expects it
    pub fn to_interval(&self) -> String {
        format!(
            "{}/{}",
            self.from.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.to.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

/// Errors that can occur when talking to the backend
#[derive(Error, Debug)]
pub enum DatasourceError {
    #[error("Broker unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Missing {0} for lookup")]
    MissingField(&'static str),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

pub type DatasourceResult<T> = Result<T, DatasourceError>;
