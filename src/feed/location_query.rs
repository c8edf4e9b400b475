//! Validated location input for a forecast request.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("A city name is required")]
    EmptyLocation,

    #[error("Country code '{0}' must consist of exactly 2 letters")]
    InvalidCountryCode(String),
}

/// A city and ISO-style two-letter country code, trimmed and checked.
///
/// # Examples
///
/// ```
/// use forecast_digest::LocationQuery;
///
/// let query = LocationQuery::new("  Lyon ", "fr").unwrap();
/// assert_eq!(query.city(), "Lyon");
/// assert_eq!(query.storage_key(), "Lyon_fr");
///
/// assert!(LocationQuery::new("Lyon", "FRA").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    city: String,
    country_code: String,
}

impl LocationQuery {
    pub fn new(city: &str, country_code: &str) -> Result<Self, QueryError> {
        let city = city.trim();
        let country_code = country_code.trim();

        if city.is_empty() {
            return Err(QueryError::EmptyLocation);
        }
        let valid_code =
            country_code.len() == 2 && country_code.chars().all(|c| c.is_ascii_alphabetic());
        if !valid_code {
            return Err(QueryError::InvalidCountryCode(country_code.to_string()));
        }

        Ok(Self {
            city: city.to_string(),
            country_code: country_code.to_string(),
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// The `q` parameter understood by OpenWeatherMap: `city,country`.
    pub fn as_query_param(&self) -> String {
        format!("{},{}", self.city, self.country_code)
    }

    /// Key under which a summary for this query is stored: `city_country`.
    pub fn storage_key(&self) -> String {
        format!("{}_{}", self.city, self.country_code)
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.country_code)
    }
}
