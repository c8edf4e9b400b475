//! Defines the interval-level forecast records handed to the aggregator: the loosely typed
//! [`RawForecastEntry`] as it arrives from a feed, and the validated [`ForecastEntry`] the
//! aggregation pass works on.

use crate::aggregation::error::AggregationError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// One forecast sample as received from the upstream feed.
///
/// The fields the aggregator needs are `Option`s so that a record with a hole in it can be
/// reported precisely (see [`AggregationError::MalformedEntry`]) instead of failing somewhere
/// deep inside deserialization.
///
/// # Examples
///
/// ```
/// use forecast_digest::RawForecastEntry;
///
/// let entry = RawForecastEntry::new("2025-11-17 00:00:00", 10.0, 82.0, "light rain")
///     .with_category("Rain")
///     .with_rain_3h(0.5);
/// assert_eq!(entry.rain_3h, Some(0.5));
/// assert_eq!(entry.snow_3h, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawForecastEntry {
    /// Local timestamp of the sample, e.g. `"2025-11-17 03:00:00"`.
    pub timestamp: Option<String>,
    /// Temperature in degrees Celsius.
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Short weather group such as `"Rain"` or `"Clouds"`.
    pub weather_category: Option<String>,
    /// Free-text description such as `"light rain"`.
    pub weather_description: Option<String>,
    /// Rain volume over the preceding interval in mm. Absent means zero.
    pub rain_3h: Option<f64>,
    /// Snow volume over the preceding interval in mm. Absent means zero.
    pub snow_3h: Option<f64>,
}

impl RawForecastEntry {
    /// Creates an entry carrying every required field.
    pub fn new(
        timestamp: impl Into<String>,
        temperature: f64,
        humidity: f64,
        weather_description: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            temperature: Some(temperature),
            humidity: Some(humidity),
            weather_description: Some(weather_description.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.weather_category = Some(category.into());
        self
    }

    pub fn with_rain_3h(mut self, rain: f64) -> Self {
        self.rain_3h = Some(rain);
        self
    }

    pub fn with_snow_3h(mut self, snow: f64) -> Self {
        self.snow_3h = Some(snow);
        self
    }

    /// Checks that the required fields are present and well formed.
    ///
    /// `index` is the position of this entry in the feed and is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::MalformedEntry`] naming the first missing or unparsable field.
    /// Precipitation volumes may be absent but must be finite when present.
    pub fn validate(&self, index: usize) -> Result<ForecastEntry, AggregationError> {
        let malformed = |field| AggregationError::MalformedEntry { index, field };

        let timestamp = self
            .timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .ok_or(malformed(EntryField::Timestamp))?;
        let temperature = self
            .temperature
            .filter(|t| t.is_finite())
            .ok_or(malformed(EntryField::Temperature))?;
        let humidity = self
            .humidity
            .filter(|h| h.is_finite())
            .ok_or(malformed(EntryField::Humidity))?;
        let description = self
            .weather_description
            .clone()
            .ok_or(malformed(EntryField::WeatherDescription))?;
        let rain_3h = volume_or_zero(self.rain_3h).ok_or(malformed(EntryField::Rain3h))?;
        let snow_3h = volume_or_zero(self.snow_3h).ok_or(malformed(EntryField::Snow3h))?;

        Ok(ForecastEntry {
            timestamp,
            temperature,
            humidity,
            category: self.weather_category.clone(),
            description,
            rain_3h,
            snow_3h,
        })
    }
}

/// Absent volumes count as zero; NaN or infinite ones yield `None`.
fn volume_or_zero(volume: Option<f64>) -> Option<f64> {
    match volume {
        None => Some(0.0),
        Some(v) => v.is_finite().then_some(v),
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// The checked fields of a [`RawForecastEntry`], used to say which one was missing or invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Timestamp,
    Temperature,
    Humidity,
    WeatherDescription,
    Rain3h,
    Snow3h,
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryField::Timestamp => "timestamp",
            EntryField::Temperature => "temperature",
            EntryField::Humidity => "humidity",
            EntryField::WeatherDescription => "weather_description",
            EntryField::Rain3h => "rain_3h",
            EntryField::Snow3h => "snow_3h",
        };
        write!(f, "{name}")
    }
}

/// A forecast sample whose required fields have been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub humidity: f64,
    pub category: Option<String>,
    pub description: String,
    pub rain_3h: f64,
    pub snow_3h: f64,
}

impl ForecastEntry {
    /// The calendar date this sample is bucketed under.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Rain counted for this sample: the interval volume when the description mentions rain.
    pub fn rain_delta(&self) -> f64 {
        if self.description.contains("rain") {
            self.rain_3h
        } else {
            0.0
        }
    }

    /// Snow counted for this sample: the interval volume when the description mentions snow.
    pub fn snow_delta(&self) -> f64 {
        if self.description.contains("snow") {
            self.snow_3h
        } else {
            0.0
        }
    }
}
