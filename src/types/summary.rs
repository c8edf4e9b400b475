//! The aggregated output: one [`DailySummary`] per calendar date, wrapped in a
//! [`PeriodSummary`] carrying the period-wide rollups.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

const TABLE_TITLE: &str = "Weather forecast";
const COLUMN_HEADERS: [&str; 4] = ["Date", "Rain (mm)", "Snow (mm)", "Major transitions"];

/// Precipitation and transition totals for a single calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Rain accumulated over the day in mm, rounded to 2 decimals.
    pub rain_total: f64,
    /// Snow accumulated over the day in mm, rounded to 2 decimals.
    pub snow_total: f64,
    /// Number of consecutive-sample temperature swings of at least 3 °C landing on this day.
    pub major_transition_count: u32,
}

/// The result of aggregating one forecast feed.
///
/// This is the only artifact handed back to callers. Renderers read `daily_details`,
/// persistence serializes the whole value (see [`crate::SummaryStore`]).
///
/// The diagnostic temperature extremes are kept on the value but left out of the serialized
/// form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// City name as reported by the feed.
    pub location_name: String,
    /// Country code as reported by the feed.
    pub country_code: String,
    pub total_rain_mm: f64,
    pub total_snow_mm: f64,
    /// Highest relative humidity seen in any sample, in percent.
    pub max_humidity: f64,
    #[serde(skip)]
    pub min_temperature: Option<f64>,
    #[serde(skip)]
    pub max_temperature: Option<f64>,
    /// Per-day summaries, strictly ascending by date.
    pub daily_details: Vec<DailySummary>,
}

impl PeriodSummary {
    /// Number of calendar dates covered by the summary.
    pub fn days(&self) -> usize {
        self.daily_details.len()
    }

    /// Looks up the summary for a single date.
    pub fn day(&self, date: NaiveDate) -> Option<&DailySummary> {
        self.daily_details
            .binary_search_by(|d| d.date.cmp(&date))
            .ok()
            .map(|i| &self.daily_details[i])
    }

    /// Total number of major transitions over the whole period.
    pub fn total_transitions(&self) -> u32 {
        self.daily_details
            .iter()
            .map(|d| d.major_transition_count)
            .sum()
    }

    fn table_rows(&self) -> Vec<[String; 4]> {
        self.daily_details
            .iter()
            .map(|d| {
                [
                    d.date.to_string(),
                    format!("{:.2}", d.rain_total),
                    format!("{:.2}", d.snow_total),
                    d.major_transition_count.to_string(),
                ]
            })
            .collect()
    }
}

/// Renders the summary as a plain text table, one row per day.
///
/// # Examples
///
/// ```
/// use forecast_digest::{aggregate, RawForecastEntry};
///
/// let entries = vec![
///     RawForecastEntry::new("2025-11-17 00:00:00", 10.0, 80.0, "light rain").with_rain_3h(0.5),
///     RawForecastEntry::new("2025-11-17 03:00:00", 14.0, 70.0, "clear sky"),
/// ];
/// let summary = aggregate(&entries, "Paris", "FR").unwrap();
/// let table = summary.to_string();
/// assert!(table.contains("2025-11-17"));
/// assert!(table.contains("0.50"));
/// ```
impl fmt::Display for PeriodSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.table_rows();
        let mut widths = COLUMN_HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }
        let title = format!("{TABLE_TITLE}: {}, {}", self.location_name, self.country_code);
        let mut inner_width = widths.iter().sum::<usize>() + 3 * (widths.len() - 1) + 2;
        // A long location name widens the last column so the borders still line up.
        let title_width = title.chars().count();
        if title_width > inner_width {
            widths[widths.len() - 1] += title_width - inner_width;
            inner_width = title_width;
        }
        let separator = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );
        let write_row = |f: &mut fmt::Formatter<'_>, cells: &[String]| -> fmt::Result {
            let padded: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|(cell, w)| format!(" {cell:>w$} "))
                .collect();
            writeln!(f, "|{}|", padded.join("|"))
        };

        writeln!(f, "+{}+", "-".repeat(inner_width))?;
        writeln!(f, "|{title:^inner_width$}|")?;
        writeln!(f, "{separator}")?;
        write_row(f, &COLUMN_HEADERS.map(String::from))?;
        writeln!(f, "{separator}")?;
        for row in &rows {
            write_row(f, row)?;
        }
        writeln!(f, "{separator}")?;
        write!(
            f,
            "Total rain: {:.2} mm | Total snow: {:.2} mm | Peak humidity: {}%",
            self.total_rain_mm, self.total_snow_mm, self.max_humidity
        )
    }
}
