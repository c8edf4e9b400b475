//! Detection of major temperature transitions between consecutive forecast samples.

/// Minimum absolute temperature change, in °C, between two consecutive samples that counts as
/// a major transition. The bound is inclusive.
pub const MAJOR_TRANSITION_DELTA: f64 = 3.0;

/// Decides whether `current` is a major transition relative to the preceding sample.
///
/// The carried state is the previous sample's temperature, passed in and handed back as a plain
/// value so the pass over a feed can thread it explicitly. Only the size of the temperature
/// swing matters; a change of weather category is neither required nor sufficient.
///
/// # Examples
///
/// ```
/// use forecast_digest::TransitionDetector;
///
/// let (fired, state) = TransitionDetector::observe(None, 10.0);
/// assert!(!fired);
/// let (fired, state) = TransitionDetector::observe(state, 13.0);
/// assert!(fired);
/// let (fired, _) = TransitionDetector::observe(state, 15.5);
/// assert!(!fired);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionDetector;

impl TransitionDetector {
    /// Returns whether a transition fired, and the state to carry into the next sample.
    ///
    /// The returned state is always `Some(current)`, whether or not a transition fired.
    pub fn observe(previous: Option<f64>, current: f64) -> (bool, Option<f64>) {
        (is_major_transition(previous, current), Some(current))
    }
}

/// `true` iff there is a previous temperature and `|current - previous| >= 3.0`.
pub fn is_major_transition(previous: Option<f64>, current: f64) -> bool {
    previous.is_some_and(|prev| (current - prev).abs() >= MAJOR_TRANSITION_DELTA)
}
