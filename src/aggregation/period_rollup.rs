//! Period-wide totals and extremes.

use crate::utils::round_2dp;

/// Running rollups over every sample of a feed.
///
/// `total_rain` and `total_snow` receive the same deltas as the daily buckets, so the sum of
/// the daily totals matches them up to rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodRollup {
    pub total_rain: f64,
    pub total_snow: f64,
    pub max_humidity: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub samples: usize,
}

impl Default for PeriodRollup {
    fn default() -> Self {
        Self {
            total_rain: 0.0,
            total_snow: 0.0,
            max_humidity: f64::NEG_INFINITY,
            min_temperature: f64::INFINITY,
            max_temperature: f64::NEG_INFINITY,
            samples: 0,
        }
    }
}

impl PeriodRollup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, rain_delta: f64, snow_delta: f64, humidity: f64, temperature: f64) {
        self.total_rain += rain_delta;
        self.total_snow += snow_delta;
        if humidity > self.max_humidity {
            self.max_humidity = humidity;
        }
        if temperature < self.min_temperature {
            self.min_temperature = temperature;
        }
        if temperature > self.max_temperature {
            self.max_temperature = temperature;
        }
        self.samples += 1;
    }

    pub fn rounded_rain(&self) -> f64 {
        round_2dp(self.total_rain)
    }

    pub fn rounded_snow(&self) -> f64 {
        round_2dp(self.total_snow)
    }

    /// Minimum and maximum temperature, or `None` before the first sample.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        (self.samples > 0).then_some((self.min_temperature, self.max_temperature))
    }
}
