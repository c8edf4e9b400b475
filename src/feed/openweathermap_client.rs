//! HTTP retrieval of the OpenWeatherMap 5 day / 3 hour forecast.

use crate::feed::error::FeedError;
use crate::feed::forecast_feed::ForecastFeed;
use crate::feed::location_query::LocationQuery;
use log::{info, warn};
use reqwest::Client;

/// Environment variable the API key is read from by [`OpenWeatherMapClient::from_env`].
pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Fetches forecast feeds for a [`LocationQuery`].
///
/// Requests are made in metric units. The API key is sent as a query parameter but never
/// appears in logs or in returned errors.
#[derive(Clone)]
pub struct OpenWeatherMapClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherMapClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a client with the key found in [`API_KEY_ENV`].
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::MissingApiKey`] if the variable is unset or blank.
    pub fn from_env() -> Result<Self, FeedError> {
        std::env::var(API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .map(Self::new)
            .ok_or(FeedError::MissingApiKey(API_KEY_ENV))
    }

    /// Points the client at another endpoint, e.g. a proxy or a local test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Downloads and decodes the forecast for `query`.
    ///
    /// # Errors
    ///
    /// * [`FeedError::NetworkRequest`] if the request could not be sent or the body not read.
    /// * [`FeedError::Api`] if the service answered with an error document (unknown city,
    ///   invalid key, ...).
    /// * [`FeedError::HttpStatus`] for other non-success responses.
    /// * Any error of [`ForecastFeed::from_json`] for a successful but unusable body.
    pub async fn fetch(&self, query: &LocationQuery) -> Result<ForecastFeed, FeedError> {
        info!("Requesting forecast for {} from {}", query, self.base_url);

        let location = query.as_query_param();
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", location.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| FeedError::NetworkRequest(self.base_url.clone(), e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FeedError::NetworkRequest(self.base_url.clone(), e.without_url()))?;

        if !status.is_success() {
            warn!("HTTP {} while fetching forecast for {}", status, query);
            return Err(match ForecastFeed::from_json(&body) {
                Err(api_error @ FeedError::Api { .. }) => api_error,
                _ => FeedError::HttpStatus {
                    url: self.base_url.clone(),
                    status,
                },
            });
        }

        let feed = ForecastFeed::from_json(&body)?;
        info!(
            "Received {} forecast entries for {}, {}",
            feed.items.len(),
            feed.city.name,
            feed.city.country
        );
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve_once, FORECAST_BODY};
    use std::error::Error;

    #[test]
    fn test_debug_hides_api_key() {
        let client = OpenWeatherMapClient::new("secret-key-123");
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-key-123"));
        assert!(debug.contains(DEFAULT_BASE_URL));
    }

    #[test]
    fn test_with_base_url() {
        let client = OpenWeatherMapClient::new("k").with_base_url("http://localhost:8080/forecast");
        assert_eq!(client.base_url(), "http://localhost:8080/forecast");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error_without_key() {
        let client =
            OpenWeatherMapClient::new("secret-key-123").with_base_url("http://127.0.0.1:9/forecast");
        let query = LocationQuery::new("Paris", "FR").unwrap();

        let err = client.fetch(&query).await.unwrap_err();
        assert!(matches!(err, FeedError::NetworkRequest(..)));

        let mut chain = vec![err.to_string()];
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        assert!(chain.iter().all(|msg| !msg.contains("secret-key-123")), "{chain:?}");
    }

    #[tokio::test]
    async fn test_fetch_decodes_feed() -> Result<(), FeedError> {
        let (url, request) = serve_once("200 OK", FORECAST_BODY).await;
        let client = OpenWeatherMapClient::new("k3y").with_base_url(url);
        let query = LocationQuery::new("Grenoble", "FR").unwrap();

        let feed = client.fetch(&query).await?;
        assert_eq!(feed.city.name, "Grenoble");
        assert_eq!(feed.items.len(), 4);

        let request_line = request.await.unwrap();
        assert!(request_line.starts_with("GET /data/2.5/forecast?"));
        assert!(request_line.contains("q=Grenoble%2CFR"));
        assert!(request_line.contains("appid=k3y"));
        assert!(request_line.contains("units=metric"));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_surfaces_api_error_document() {
        let body = r#"{"cod":"404","message":"city not found"}"#;
        let (url, _request) = serve_once("404 Not Found", body).await;
        let client = OpenWeatherMapClient::new("k").with_base_url(url);
        let query = LocationQuery::new("Nowhereville", "XX").unwrap();

        match client.fetch(&query).await {
            Err(FeedError::Api { code, message }) => {
                assert_eq!(code, "404");
                assert_eq!(message, "city not found");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_maps_other_failures_to_http_status() {
        let (url, _request) = serve_once("502 Bad Gateway", "<html>bad gateway</html>").await;
        let client = OpenWeatherMapClient::new("k").with_base_url(url);
        let query = LocationQuery::new("Paris", "FR").unwrap();

        match client.fetch(&query).await {
            Err(FeedError::HttpStatus { status, .. }) => {
                assert_eq!(status, reqwest::StatusCode::BAD_GATEWAY);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    #[ignore = "requires network access and OPENWEATHERMAP_API_KEY"]
    async fn test_fetch_live_forecast() -> Result<(), FeedError> {
        let client = OpenWeatherMapClient::from_env()?;
        let query = LocationQuery::new("Paris", "FR").unwrap();

        let feed = client.fetch(&query).await?;

        assert_eq!(feed.city.country, "FR");
        assert!(!feed.items.is_empty());
        Ok(())
    }
}
