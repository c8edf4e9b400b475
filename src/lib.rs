mod aggregation;
mod error;
mod feed;
mod forecast_digest;
mod storage;
mod types;
mod utils;

#[cfg(test)]
mod test_support;

pub use error::ForecastError;
pub use forecast_digest::*;

pub use aggregation::aggregator::{aggregate, ForecastAggregator};
pub use aggregation::daily_accumulator::{DailyAccumulator, DailyBucket};
pub use aggregation::period_rollup::PeriodRollup;
pub use aggregation::transition::{is_major_transition, TransitionDetector, MAJOR_TRANSITION_DELTA};

pub use feed::forecast_feed::{City, FeedItem, ForecastFeed, MainReadings, Volume, WeatherTag};
pub use feed::location_query::LocationQuery;
pub use feed::openweathermap_client::{OpenWeatherMapClient, API_KEY_ENV};

pub use storage::summary_store::{SummaryStore, DEFAULT_OUTPUT_DIR};

pub use types::forecast_entry::{EntryField, ForecastEntry, RawForecastEntry};
pub use types::summary::{DailySummary, PeriodSummary};

pub use utils::{round_2dp, within_cent};

pub use aggregation::error::AggregationError;
pub use feed::error::FeedError;
pub use feed::location_query::QueryError;
pub use storage::error::StorageError;
