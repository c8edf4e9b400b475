//! The main entry point: validate a location, fetch its forecast, aggregate it and optionally
//! persist the result.

use crate::aggregation::aggregator::ForecastAggregator;
use crate::error::ForecastError;
use crate::feed::location_query::LocationQuery;
use crate::feed::openweathermap_client::OpenWeatherMapClient;
use crate::storage::summary_store::SummaryStore;
use crate::types::summary::PeriodSummary;
use bon::bon;
use log::info;

/// Ties the feed client, the aggregator and the summary store together.
///
/// Create one with [`ForecastDigest::new()`], which reads the API key from the environment and
/// stores summaries under `json/`, or with [`ForecastDigest::with_parts()`] for full control.
///
/// # Examples
///
/// ```no_run
/// # use forecast_digest::{ForecastDigest, ForecastError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ForecastError> {
/// let digest = ForecastDigest::new()?;
/// let summary = digest
///     .summarize()
///     .location("Paris")
///     .country("FR")
///     .persist(true)
///     .call()
///     .await?;
/// println!("{summary}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ForecastDigest {
    client: OpenWeatherMapClient,
    store: SummaryStore,
}

#[bon]
impl ForecastDigest {
    /// Creates a digest using the API key from `OPENWEATHERMAP_API_KEY` and the default store.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::FeedUnavailable`] if no API key is configured.
    pub fn new() -> Result<Self, ForecastError> {
        Ok(Self::with_parts(
            OpenWeatherMapClient::from_env()?,
            SummaryStore::new(),
        ))
    }

    pub fn with_parts(client: OpenWeatherMapClient, store: SummaryStore) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &SummaryStore {
        &self.store
    }

    /// Fetches and aggregates the forecast for a location.
    ///
    /// # Arguments
    ///
    /// * `.location(&str)`: **Required.** City name.
    /// * `.country(&str)`: **Required.** Two-letter country code.
    /// * `.persist(bool)`: Optional. Also save the summary in the store under
    ///   [`LocationQuery::storage_key`]. Defaults to `false`.
    ///
    /// The returned summary's location fields come from the feed, not from the arguments.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::InvalidQuery`] before any request if the location input is invalid.
    /// * [`ForecastError::FeedUnavailable`] for any retrieval or decoding failure.
    /// * [`ForecastError::Aggregation`] if the feed is empty or has a malformed entry.
    /// * [`ForecastError::Storage`] if persisting was requested and failed.
    #[builder]
    pub async fn summarize(
        &self,
        location: &str,
        country: &str,
        persist: Option<bool>,
    ) -> Result<PeriodSummary, ForecastError> {
        let query = LocationQuery::new(location, country)?;
        let feed = self.client.fetch(&query).await?;
        let summary = ForecastAggregator::aggregate_feed(&feed)?;

        if persist.unwrap_or(false) {
            let path = self.store.save(&query.storage_key(), &summary).await?;
            info!("Forecast summary for {} saved to {}", query, path.display());
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::error::AggregationError;
    use crate::feed::error::FeedError;
    use crate::feed::location_query::QueryError;
    use crate::test_support::{serve_once, FORECAST_BODY};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn digest(url: &str, folder: &std::path::Path) -> ForecastDigest {
        ForecastDigest::with_parts(
            OpenWeatherMapClient::new("k").with_base_url(url),
            SummaryStore::with_folder(folder),
        )
    }

    #[tokio::test]
    async fn test_summarize_and_persist() -> Result<(), ForecastError> {
        let dir = tempdir().unwrap();
        let (url, _request) = serve_once("200 OK", FORECAST_BODY).await;
        let digest = digest(&url, dir.path());

        let summary = digest
            .summarize()
            .location(" grenoble ")
            .country("fr")
            .persist(true)
            .call()
            .await?;

        assert_eq!(summary.location_name, "Grenoble");
        assert_eq!(summary.country_code, "FR");
        assert_eq!(summary.total_rain_mm, 0.35);
        assert_eq!(summary.total_snow_mm, 1.6);
        assert_eq!(summary.max_humidity, 94.0);
        assert_eq!(summary.days(), 2);

        let first = summary
            .day(NaiveDate::from_ymd_opt(2025, 11, 17).unwrap())
            .unwrap();
        assert_eq!(first.rain_total, 0.35);
        assert_eq!(first.snow_total, 0.4);
        assert_eq!(first.major_transition_count, 1);

        let second = &summary.daily_details[1];
        assert_eq!(second.snow_total, 1.2);
        assert_eq!(second.major_transition_count, 0);

        let stored = digest.store().load("grenoble_fr").await?;
        assert_eq!(stored.daily_details, summary.daily_details);
        Ok(())
    }

    #[tokio::test]
    async fn test_summarize_without_persist_writes_nothing() -> Result<(), ForecastError> {
        let dir = tempdir().unwrap();
        let (url, _request) = serve_once("200 OK", FORECAST_BODY).await;

        digest(&url, dir.path())
            .summarize()
            .location("Grenoble")
            .country("FR")
            .call()
            .await?;

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_query_fails_before_fetching() {
        let dir = tempdir().unwrap();
        let digest = digest("http://127.0.0.1:9/forecast", dir.path());

        let result = digest.summarize().location("Paris").country("FRA").call().await;
        assert!(matches!(
            result,
            Err(ForecastError::InvalidQuery(QueryError::InvalidCountryCode(_)))
        ));
    }

    #[tokio::test]
    async fn test_empty_feed_is_an_aggregation_error() {
        let dir = tempdir().unwrap();
        let body = r#"{"cod":"200","list":[],"city":{"name":"Paris","country":"FR"}}"#;
        let (url, _request) = serve_once("200 OK", body).await;

        let result = digest(&url, dir.path())
            .summarize()
            .location("Paris")
            .country("FR")
            .persist(true)
            .call()
            .await;

        assert!(matches!(
            result,
            Err(ForecastError::Aggregation(AggregationError::EmptyFeed))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_feed_unavailable() {
        let dir = tempdir().unwrap();
        let digest = digest("http://127.0.0.1:9/forecast", dir.path());

        let result = digest.summarize().location("Paris").country("FR").call().await;
        assert!(matches!(
            result,
            Err(ForecastError::FeedUnavailable(FeedError::NetworkRequest(..)))
        ));
    }
}
