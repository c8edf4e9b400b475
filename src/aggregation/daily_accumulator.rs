//! Per-date running totals.

use crate::types::summary::DailySummary;
use crate::utils::round_2dp;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Running totals for one calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyBucket {
    pub rain_total: f64,
    pub snow_total: f64,
    pub major_transition_count: u32,
}

/// Buckets forecast samples by calendar date.
///
/// Buckets are created on the first sample of a date and only ever grow; [`Self::finish`]
/// rounds them and returns them sorted by date.
#[derive(Debug, Default)]
pub struct DailyAccumulator {
    buckets: HashMap<NaiveDate, DailyBucket>,
}

impl DailyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one sample's contribution to the bucket for `date`.
    pub fn accumulate(&mut self, date: NaiveDate, rain_delta: f64, snow_delta: f64, transition: bool) {
        let bucket = self.buckets.entry(date).or_default();
        bucket.rain_total += rain_delta;
        bucket.snow_total += snow_delta;
        if transition {
            bucket.major_transition_count += 1;
        }
    }

    pub fn bucket(&self, date: NaiveDate) -> Option<&DailyBucket> {
        self.buckets.get(&date)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Rounds every bucket and returns them ascending by date.
    pub fn finish(self) -> Vec<DailySummary> {
        let mut days: Vec<DailySummary> = self
            .buckets
            .into_iter()
            .map(|(date, bucket)| DailySummary {
                date,
                rain_total: round_2dp(bucket.rain_total),
                snow_total: round_2dp(bucket.snow_total),
                major_transition_count: bucket.major_transition_count,
            })
            .collect();
        days.sort_unstable_by_key(|d| d.date);
        days
    }
}
