//! Druid broker client
//!
//! HTTP implementation of [`Datasource`] against a broker's native query API.

use super::{
    Datasource, DatasourceError, DatasourceResult, DimensionsAndMetrics, FilterValuesResponse,
    TimeRange, TopNBucket,
};
use crate::target::{has_text, QueryTarget};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Number of values returned by a filter value lookup
const FILTER_VALUES_THRESHOLD: u32 = 10;

/// Name of the count column ranking filter values
const FILTER_VALUES_METRIC: &str = "count";

/// Broker connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    /// Base URL of the broker (e.g., "http://localhost:8082")
    #[serde(default = "default_broker_url")]
    pub url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Share datasource and column lookups between callers
    #[serde(default = "default_cache_lookups")]
    pub cache_lookups: bool,
}

fn default_broker_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_cache_lookups() -> bool {
    true
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            url: default_broker_url(),
            request_timeout_ms: default_request_timeout_ms(),
            cache_lookups: default_cache_lookups(),
        }
    }
}

/// Druid broker REST client
pub struct BrokerClient {
    client: Client,
    config: BrokerConfig,
}

impl BrokerClient {
    /// Create a client for the configured broker
    pub fn new(config: BrokerConfig) -> DatasourceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> DatasourceResult<T> {
        tracing::debug!(url, "broker GET");
        let response = self.client.get(url).send().await.map_err(map_send_error)?;
        decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, url: &str, body: &Value) -> DatasourceResult<T> {
        tracing::debug!(url, "broker POST");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_send_error)?;
        decode(response).await
    }
}

#[async_trait]
impl Datasource for BrokerClient {
    async fn list_data_sources(&self) -> DatasourceResult<Vec<String>> {
        self.get_json(&self.endpoint("/druid/v2/datasources")).await
    }

    async fn get_dimensions_and_metrics(&self, datasource: &str) -> DatasourceResult<DimensionsAndMetrics> {
        if datasource.is_empty() {
            return Err(DatasourceError::MissingField("druidDS"));
        }
        let path = format!("/druid/v2/datasources/{}", urlencoding::encode(datasource));
        self.get_json(&self.endpoint(&path)).await
    }

    async fn get_filter_values(
        &self,
        target: &QueryTarget,
        range: &TimeRange,
        query: &str,
    ) -> DatasourceResult<FilterValuesResponse> {
        let body = filter_values_query(target, range, query)?;
        let data: Vec<TopNBucket> = self.post_json(&self.endpoint("/druid/v2"), &body).await?;
        Ok(FilterValuesResponse { data })
    }
}

/// Build the topN query listing values of the draft filter's dimension
pub(crate) fn filter_values_query(
    target: &QueryTarget,
    range: &TimeRange,
    query: &str,
) -> DatasourceResult<Value> {
    let datasource = target
        .druid_ds
        .as_deref()
        .filter(|ds| !ds.is_empty())
        .ok_or(DatasourceError::MissingField("druidDS"))?;
    if !has_text(&target.current_filter.dimension) {
        return Err(DatasourceError::MissingField("dimension"));
    }
    let dimension = target.current_filter.dimension.as_deref().unwrap_or_default();

    let mut body = json!({
        "queryType": "topN",
        "dataSource": datasource,
        "granularity": "all",
        "dimension": dimension,
        "metric": FILTER_VALUES_METRIC,
        "threshold": FILTER_VALUES_THRESHOLD,
        "aggregations": [{ "type": "count", "name": FILTER_VALUES_METRIC }],
        "intervals": [range.to_interval()],
        "context": { "queryId": uuid::Uuid::new_v4().to_string() },
    });

    if !query.is_empty() {
        body["filter"] = json!({
            "type": "search",
            "dimension": dimension,
            "query": { "type": "insensitive_contains", "value": query },
        });
    }

    Ok(body)
}

fn map_send_error(e: reqwest::Error) -> DatasourceError {
    if e.is_timeout() {
        DatasourceError::Timeout
    } else if e.is_connect() {
        DatasourceError::Unavailable
    } else {
        DatasourceError::Request(e)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> DatasourceResult<T> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "broker returned an error");
        return Err(DatasourceError::ApiError {
            status: status.as_u16(),
            message: text,
        });
    }

    let bytes = response.bytes().await.map_err(map_send_error)?;
    serde_json::from_slice(&bytes).map_err(|e| DatasourceError::Decode(e.to_string()))
}
