//! Typeahead lookups
//!
//! Picker lists derived from a [`Datasource`]. Datasource names and column
//! lists go through the lookup cache when it is enabled; filter values depend
//! on the typed text and always hit the backend.

use super::{
    Datasource, DatasourceError, DatasourceResult, DimensionsAndMetrics, LookupCache, TimeRange,
};
use crate::target::QueryTarget;
use serde_json::Value;

pub struct Lookups<D> {
    source: D,
    data_sources: Option<LookupCache<(), Vec<String>>>,
    columns: Option<LookupCache<String, DimensionsAndMetrics>>,
}

impl<D: Datasource> Lookups<D> {
    /// Lookups that always hit the datasource
    pub fn new(source: D) -> Self {
        Self {
            source,
            data_sources: None,
            columns: None,
        }
    }

    /// Lookups that share datasource and column results
    pub fn cached(source: D) -> Self {
        Self {
            source,
            data_sources: Some(LookupCache::new()),
            columns: Some(LookupCache::new()),
        }
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    /// Names of all datasources
    pub async fn data_sources(&self) -> DatasourceResult<Vec<String>> {
        match &self.data_sources {
            Some(cache) => {
                cache
                    .get_or_fetch((), || self.source.list_data_sources())
                    .await
            }
            None => self.source.list_data_sources().await,
        }
    }

    /// Dimensions and metrics of the target's datasource
    pub async fn dimensions_and_metrics(&self, target: &QueryTarget) -> DatasourceResult<DimensionsAndMetrics> {
        let datasource = target
            .druid_ds
            .as_deref()
            .filter(|ds| !ds.is_empty())
            .ok_or(DatasourceError::MissingField("druidDS"))?;

        match &self.columns {
            Some(cache) => {
                cache
                    .get_or_fetch(datasource.to_string(), || {
                        self.source.get_dimensions_and_metrics(datasource)
                    })
                    .await
            }
            None => self.source.get_dimensions_and_metrics(datasource).await,
        }
    }

    pub async fn dimensions(&self, target: &QueryTarget) -> DatasourceResult<Vec<String>> {
        Ok(self.dimensions_and_metrics(target).await?.dimensions)
    }

    pub async fn metrics(&self, target: &QueryTarget) -> DatasourceResult<Vec<String>> {
        Ok(self.dimensions_and_metrics(target).await?.metrics)
    }

    /// Metrics followed by dimensions
    pub async fn metrics_plus_dimensions(&self, target: &QueryTarget) -> DatasourceResult<Vec<String>> {
        let columns = self.dimensions_and_metrics(target).await?;
        let mut names = columns.metrics;
        names.extend(columns.dimensions);
        Ok(names)
    }

    /// Columns offered for scan queries, metrics first
    pub async fn scan_columns(&self, target: &QueryTarget) -> DatasourceResult<Vec<String>> {
        self.metrics_plus_dimensions(target).await
    }

    /// Values of the draft filter's dimension matching `query`
    ///
    /// Records without a value for the dimension are skipped.
    pub async fn filter_values(
        &self,
        target: &QueryTarget,
        range: &TimeRange,
        query: &str,
    ) -> DatasourceResult<Vec<String>> {
        let dimension = target
            .current_filter
            .dimension
            .as_deref()
            .ok_or(DatasourceError::MissingField("dimension"))?;

        let response = self.source.get_filter_values(target, range, query).await?;
        let Some(bucket) = response.data.first() else {
            return Ok(Vec::new());
        };

        let values: Vec<String> = bucket
            .result
            .iter()
            .filter_map(|record| match record.get(dimension)? {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect();

        tracing::debug!(dimension, query, values = values.len(), "filter values");
        Ok(values)
    }

    /// Forget cached datasource names and columns
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.data_sources {
            cache.clear().await;
        }
        if let Some(cache) = &self.columns {
            cache.clear().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::{FilterValuesResponse, TopNBucket};
    use crate::target::Filter;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeDatasource {
        column_calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Datasource for FakeDatasource {
        async fn list_data_sources(&self) -> DatasourceResult<Vec<String>> {
            if self.fail {
                return Err(DatasourceError::Unavailable);
            }
            Ok(vec!["wikipedia".to_string(), "metrics".to_string()])
        }

        async fn get_dimensions_and_metrics(&self, _datasource: &str) -> DatasourceResult<DimensionsAndMetrics> {
            self.column_calls.fetch_add(1, Ordering::SeqCst);
            Ok(DimensionsAndMetrics {
                dimensions: vec!["page".to_string(), "user".to_string()],
                metrics: vec!["added".to_string()],
            })
        }

        async fn get_filter_values(
            &self,
            _target: &QueryTarget,
            _range: &TimeRange,
            _query: &str,
        ) -> DatasourceResult<FilterValuesResponse> {
            let records = json!([
                { "page": "Main_Page", "count": 10 },
                { "count": 3 },
                { "page": null, "count": 2 },
                { "page": 42, "count": 1 },
            ]);
            let result = serde_json::from_value(records).unwrap();
            Ok(FilterValuesResponse {
                data: vec![TopNBucket {
                    timestamp: None,
                    result,
                }],
            })
        }
    }

    fn target() -> QueryTarget {
        let mut target = QueryTarget::new().with_datasource("wikipedia");
        target.current_filter = Filter::new("selector");
        target.current_filter.dimension = Some("page".to_string());
        target
    }

    #[tokio::test]
    async fn test_column_lists() {
        let lookups = Lookups::new(FakeDatasource::default());
        let target = target();

        assert_eq!(lookups.dimensions(&target).await.unwrap(), vec!["page", "user"]);
        assert_eq!(lookups.metrics(&target).await.unwrap(), vec!["added"]);
        assert_eq!(
            lookups.metrics_plus_dimensions(&target).await.unwrap(),
            vec!["added", "page", "user"]
        );
        assert_eq!(
            lookups.scan_columns(&target).await.unwrap(),
            vec!["added", "page", "user"]
        );
        assert_eq!(lookups.source().column_calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_cached_columns_fetch_once() {
        let lookups = Lookups::cached(FakeDatasource::default());
        let target = target();

        lookups.dimensions(&target).await.unwrap();
        lookups.metrics(&target).await.unwrap();
        lookups.scan_columns(&target).await.unwrap();
        assert_eq!(lookups.source().column_calls.load(Ordering::SeqCst), 1);

        lookups.invalidate().await;
        lookups.dimensions(&target).await.unwrap();
        assert_eq!(lookups.source().column_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_datasource() {
        let lookups = Lookups::new(FakeDatasource::default());
        let target = QueryTarget::new();
        assert!(matches!(
            lookups.dimensions(&target).await,
            Err(DatasourceError::MissingField("druidDS"))
        ));
    }

    #[tokio::test]
    async fn test_data_source_errors_propagate() {
        let lookups = Lookups::cached(FakeDatasource {
            fail: true,
            ..Default::default()
        });
        assert!(matches!(
            lookups.data_sources().await,
            Err(DatasourceError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn test_filter_values_projection() {
        let lookups = Lookups::new(FakeDatasource::default());
        let range = TimeRange::last(chrono::Duration::hours(1)).unwrap();

        let values = lookups.filter_values(&target(), &range, "ma").await.unwrap();
        assert_eq!(values, vec!["Main_Page", "42"]);
    }
}
