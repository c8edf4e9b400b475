/// Rounds to 2 decimal places, halves away from zero.
///
/// Every reported total (daily and period-wide) goes through this, so the two stay comparable.
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `true` when `a` and `b` differ by at most 0.01, the tolerance between summed daily totals
/// and the rounded period totals.
pub fn within_cent(a: f64, b: f64) -> bool {
    (a - b).abs() <= 0.01 + f64::EPSILON * a.abs().max(b.abs()).max(1.0)
}
