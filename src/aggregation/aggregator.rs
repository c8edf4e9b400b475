//! Single-pass aggregation of a forecast feed into a [`PeriodSummary`].

use crate::aggregation::daily_accumulator::DailyAccumulator;
use crate::aggregation::error::AggregationError;
use crate::aggregation::period_rollup::PeriodRollup;
use crate::aggregation::transition::TransitionDetector;
use crate::feed::forecast_feed::ForecastFeed;
use crate::types::forecast_entry::{ForecastEntry, RawForecastEntry};
use crate::types::summary::PeriodSummary;
use crate::utils::round_2dp;
use chrono::NaiveDateTime;
use log::{debug, warn};

/// Drives the aggregation pass.
///
/// Aggregation is a pure function of its input: each call owns its own accumulators, so
/// independent feeds can be aggregated concurrently. Within one call the entries are processed
/// strictly in input order because transition detection depends on the preceding sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastAggregator;

/// What is carried from one entry to the next.
#[derive(Debug, Default)]
struct PassState {
    previous_temperature: Option<f64>,
    previous_timestamp: Option<NaiveDateTime>,
}

impl ForecastAggregator {
    /// Aggregates `entries` into daily buckets and period rollups.
    ///
    /// Every entry is validated before any aggregation happens, so a bad entry anywhere in the
    /// feed yields an error and never a partial summary.
    ///
    /// Out-of-range values are aggregated as they are: negative precipitation, humidity outside
    /// `[0, 100]` and timestamps that go backwards are only reported through `log::warn!`.
    ///
    /// # Errors
    ///
    /// * [`AggregationError::EmptyFeed`] if `entries` is empty.
    /// * [`AggregationError::MalformedEntry`] for the first entry missing a timestamp,
    ///   temperature, humidity or weather description.
    ///
    /// # Examples
    ///
    /// ```
    /// use forecast_digest::{ForecastAggregator, RawForecastEntry};
    ///
    /// let entries = vec![
    ///     RawForecastEntry::new("2025-11-17 00:00:00", 10.0, 80.0, "rain").with_rain_3h(0.5),
    ///     RawForecastEntry::new("2025-11-17 03:00:00", 14.0, 75.0, "clear"),
    /// ];
    /// let summary = ForecastAggregator::aggregate(&entries, "Paris", "FR")?;
    ///
    /// assert_eq!(summary.total_rain_mm, 0.5);
    /// assert_eq!(summary.daily_details.len(), 1);
    /// assert_eq!(summary.daily_details[0].major_transition_count, 1);
    /// # Ok::<(), forecast_digest::AggregationError>(())
    /// ```
    pub fn aggregate(
        entries: &[RawForecastEntry],
        location_name: &str,
        country_code: &str,
    ) -> Result<PeriodSummary, AggregationError> {
        if entries.is_empty() {
            return Err(AggregationError::EmptyFeed);
        }

        let entries = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        let mut daily = DailyAccumulator::new();
        let mut rollup = PeriodRollup::new();

        entries
            .iter()
            .enumerate()
            .fold(PassState::default(), |state, (index, entry)| {
                report_anomalies(index, entry, state.previous_timestamp);

                let rain = entry.rain_delta();
                let snow = entry.snow_delta();
                let (transition, previous_temperature) =
                    TransitionDetector::observe(state.previous_temperature, entry.temperature);

                daily.accumulate(entry.date(), rain, snow, transition);
                rollup.observe(rain, snow, entry.humidity, entry.temperature);

                PassState {
                    previous_temperature,
                    previous_timestamp: Some(entry.timestamp),
                }
            });

        // Period totals are summed from the rounded days so that the days always add up to them.
        let daily_details = daily.finish();
        let total_rain_mm = round_2dp(daily_details.iter().map(|d| d.rain_total).sum());
        let total_snow_mm = round_2dp(daily_details.iter().map(|d| d.snow_total).sum());

        let (min_temperature, max_temperature) = rollup.temperature_range().unzip();
        let summary = PeriodSummary {
            location_name: location_name.to_string(),
            country_code: country_code.to_string(),
            total_rain_mm,
            total_snow_mm,
            max_humidity: rollup.max_humidity,
            min_temperature,
            max_temperature,
            daily_details,
        };

        debug!(
            "Aggregated {} entries for {}, {} into {} days ({} mm rain, {} mm snow, {} transitions; unrounded {} mm rain, {} mm snow)",
            rollup.samples,
            summary.location_name,
            summary.country_code,
            summary.days(),
            summary.total_rain_mm,
            summary.total_snow_mm,
            summary.total_transitions(),
            rollup.rounded_rain(),
            rollup.rounded_snow()
        );

        Ok(summary)
    }

    /// Aggregates a decoded feed, taking the location metadata from the feed's city block.
    ///
    /// # Errors
    ///
    /// Same as [`Self::aggregate`].
    pub fn aggregate_feed(feed: &ForecastFeed) -> Result<PeriodSummary, AggregationError> {
        let entries = feed.entries();
        Self::aggregate(&entries, &feed.city.name, &feed.city.country)
    }
}

/// Shorthand for [`ForecastAggregator::aggregate`].
pub fn aggregate(
    entries: &[RawForecastEntry],
    location_name: &str,
    country_code: &str,
) -> Result<PeriodSummary, AggregationError> {
    ForecastAggregator::aggregate(entries, location_name, country_code)
}

fn report_anomalies(index: usize, entry: &ForecastEntry, previous: Option<NaiveDateTime>) {
    if entry.rain_3h < 0.0 || entry.snow_3h < 0.0 {
        warn!(
            "Entry {} has negative precipitation (rain {}, snow {}); aggregating as-is",
            index, entry.rain_3h, entry.snow_3h
        );
    }
    if !(0.0..=100.0).contains(&entry.humidity) {
        warn!(
            "Entry {} has humidity {} outside [0, 100]; aggregating as-is",
            index, entry.humidity
        );
    }
    if let Some(previous) = previous.filter(|p| entry.timestamp < *p) {
        warn!(
            "Entry {} at {} precedes the previous entry at {}; feed is not chronological",
            index, entry.timestamp, previous
        );
    }
}
