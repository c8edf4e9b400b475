//! Wire types for the OpenWeatherMap 5 day / 3 hour forecast document and their conversion
//! into [`RawForecastEntry`] values.
//!
//! Individual fields are decoded leniently: a value that is absent *or* of the wrong JSON type
//! becomes `None`, and it is left to the aggregator to reject the entry with a precise
//! [`crate::AggregationError::MalformedEntry`]. Only the document envelope (`cod`, `list`,
//! `city`) is checked here.

use crate::feed::error::FeedError;
use crate::types::forecast_entry::RawForecastEntry;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const SUCCESS_CODE: &str = "200";

/// Deserializes any JSON value, yielding `None` instead of an error when it doesn't fit `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// The `city` block of the forecast document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
}

/// The `main` block of one forecast item.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MainReadings {
    #[serde(default, deserialize_with = "lenient")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub humidity: Option<f64>,
}

/// One element of the `weather` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherTag {
    #[serde(default, deserialize_with = "lenient")]
    pub main: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

/// A `rain` or `snow` block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Volume {
    #[serde(rename = "3h", default, deserialize_with = "lenient")]
    pub three_hours: Option<f64>,
}

/// One element of the `list` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedItem {
    #[serde(default, deserialize_with = "lenient")]
    pub dt_txt: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub main: Option<MainReadings>,
    #[serde(default, deserialize_with = "lenient")]
    pub weather: Option<Vec<WeatherTag>>,
    #[serde(default, deserialize_with = "lenient")]
    pub rain: Option<Volume>,
    #[serde(default, deserialize_with = "lenient")]
    pub snow: Option<Volume>,
}

impl From<&FeedItem> for RawForecastEntry {
    fn from(item: &FeedItem) -> Self {
        let main = item.main.clone().unwrap_or_default();
        let tag = item
            .weather
            .as_ref()
            .and_then(|tags| tags.first())
            .cloned()
            .unwrap_or_default();
        RawForecastEntry {
            timestamp: item.dt_txt.clone(),
            temperature: main.temp,
            humidity: main.humidity,
            weather_category: tag.main,
            weather_description: tag.description,
            rain_3h: item.rain.as_ref().and_then(|v| v.three_hours),
            snow_3h: item.snow.as_ref().and_then(|v| v.three_hours),
        }
    }
}

/// `cod` is a string on success and sometimes a number on failure.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseCode {
    Text(String),
    Number(i64),
}

impl ResponseCode {
    fn into_string(self) -> String {
        match self {
            ResponseCode::Text(s) => s,
            ResponseCode::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    cod: Option<ResponseCode>,
    message: Option<Value>,
    list: Option<Vec<FeedItem>>,
    city: Option<City>,
}

/// A decoded forecast document: location metadata plus the ordered forecast items.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastFeed {
    pub city: City,
    pub items: Vec<FeedItem>,
}

impl ForecastFeed {
    /// Decodes a forecast document as returned by the `data/2.5/forecast` endpoint.
    ///
    /// # Errors
    ///
    /// * [`FeedError::Api`] if the document carries a `cod` other than `"200"`.
    /// * [`FeedError::MissingList`] if there is no `list` array.
    /// * [`FeedError::MissingCity`] if there is no `city` block.
    /// * [`FeedError::Decode`] if the body isn't JSON of the expected overall shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use forecast_digest::ForecastFeed;
    ///
    /// let body = r#"{
    ///     "cod": "200",
    ///     "list": [{
    ///         "dt_txt": "2025-11-17 00:00:00",
    ///         "main": {"temp": 10.0, "humidity": 81},
    ///         "weather": [{"main": "Rain", "description": "light rain"}],
    ///         "rain": {"3h": 0.5}
    ///     }],
    ///     "city": {"name": "Paris", "country": "FR"}
    /// }"#;
    /// let feed = ForecastFeed::from_json(body)?;
    /// let entries = feed.entries();
    /// assert_eq!(entries[0].rain_3h, Some(0.5));
    /// assert_eq!(feed.city.country, "FR");
    /// # Ok::<(), forecast_digest::FeedError>(())
    /// ```
    pub fn from_json(body: &str) -> Result<Self, FeedError> {
        let envelope: Envelope = serde_json::from_str(body)?;

        if let Some(code) = envelope.cod.map(ResponseCode::into_string) {
            if code != SUCCESS_CODE {
                let message = match envelope.message {
                    Some(Value::String(s)) => s,
                    Some(Value::Null) | None => "unknown error".to_string(),
                    Some(other) => other.to_string(),
                };
                return Err(FeedError::Api { code, message });
            }
        }

        Ok(Self {
            items: envelope.list.ok_or(FeedError::MissingList)?,
            city: envelope.city.ok_or(FeedError::MissingCity)?,
        })
    }

    /// Converts every item into a [`RawForecastEntry`], keeping feed order.
    pub fn entries(&self) -> Vec<RawForecastEntry> {
        self.items.iter().map(RawForecastEntry::from).collect()
    }
}
