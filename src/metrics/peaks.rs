//! Peak interval search: critical power and best pace.
//!
//! A single pass over the series drives a rolling window and keeps a
//! snapshot of the best full window seen so far. No window is rescanned, so
//! each query is linear in the number of samples.

use serde::Serialize;

use super::error::AnalyticsResult;
use super::gaps::GapPolicy;
use super::rolling::{DistanceWeightedWindow, RollingAggregator, TimeWeightedWindow};

/// Labeled durations (seconds) searched for critical power.
pub const STANDARD_POWER_PERIODS: &[(&str, u32)] = &[
    ("5 s", 5),
    ("15 s", 15),
    ("30 s", 30),
    ("1 min", 60),
    ("2 min", 120),
    ("5 min", 300),
    ("10 min", 600),
    ("15 min", 900),
    ("20 min", 1200),
    ("30 min", 1800),
    ("1 hour", 3600),
];

/// Labeled distances (meters) searched for best pace.
pub const STANDARD_PACE_DISTANCES: &[(&str, u32)] = &[
    ("100 m", 100),
    ("200 m", 200),
    ("400 m", 400),
    ("1 km", 1000),
    ("1 mile", 1609),
    ("3 km", 3000),
    ("5 km", 5000),
    ("10 km", 10000),
    ("13.1 mile", 21082),
    ("26.2 mile", 42165),
    ("50 km", 50000),
];

/// Which direction of the window statistic counts as better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Peak {
    /// Higher is better (power).
    Maximize,
    /// Lower is better (pace, seconds per meter).
    Minimize,
}

impl Peak {
    /// Whether `current` strictly beats `leader`.
    ///
    /// Ties keep the leader, so the earliest window reaching a value wins.
    pub fn beats(self, current: Option<f64>, leader: Option<f64>) -> bool {
        match (current, leader) {
            (Some(c), Some(l)) => match self {
                Peak::Maximize => c > l,
                Peak::Minimize => c < l,
            },
            (Some(c), None) => !c.is_nan(),
            (None, _) => false,
        }
    }
}

/// Snapshot of the best window found by a peak search.
///
/// Owns a truncated copy of the window at the moment it led, so it is not
/// affected by anything the search did afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct PeakResult<W> {
    /// Requested span (seconds or meters).
    pub period: f64,
    /// First real (non-pad) timestamp of the interval.
    pub start_timestamp: Option<f64>,
    /// Last real (non-pad) timestamp of the interval.
    pub end_timestamp: Option<f64>,
    /// The window statistic (watts, or seconds per meter).
    pub value: Option<f64>,
    /// Active values, pads reading as zero and missing readings dropped.
    pub raw_values: Vec<f64>,
    #[serde(skip)]
    window: W,
}

impl<W: RollingAggregator> PeakResult<W> {
    /// Freeze a window snapshot into a result.
    pub fn from_window(window: W) -> Self {
        Self {
            period: window.period(),
            start_timestamp: window.first_timestamp(true),
            end_timestamp: window.last_timestamp(true),
            value: window.avg(),
            raw_values: window.values().iter().filter_map(|v| v.as_f64()).collect(),
            window,
        }
    }

    pub fn avg(&self) -> Option<f64> {
        self.value
    }

    /// Elapsed time of the interval, pads included.
    pub fn elapsed(&self) -> f64 {
        self.window.elapsed()
    }

    /// The snapshot window itself.
    pub fn window(&self) -> &W {
        &self.window
    }
}

impl PeakResult<TimeWeightedWindow> {
    /// Energy over the interval in kilojoules.
    pub fn kj(&self) -> f64 {
        self.window.kj()
    }
}

impl PeakResult<DistanceWeightedWindow> {
    /// Distance covered by the interval in meters.
    pub fn distance(&self) -> Option<f64> {
        self.window.distance()
    }
}

/// A zero, negative or non-finite span has no best window.
fn is_searchable_span(span: f64) -> bool {
    span > 0.0 && span.is_finite()
}

/// Run a peak search with a prepared window.
pub fn find_peak<W, V>(
    mut window: W,
    peak: Peak,
    times: &[f64],
    values: &[V],
) -> AnalyticsResult<Option<PeakResult<W>>>
where
    W: RollingAggregator,
    V: Copy + Into<Option<f64>>,
{
    let leader = window.import_reduce(times, values, |current, leader| {
        peak.beats(current.avg(), leader.avg())
    })?;
    Ok(leader.map(PeakResult::from_window))
}

/// Highest average power sustained for `period` seconds.
///
/// The gap policy is derived from the timestamps. Returns `None` when the
/// series has fewer than two samples, never spans `period`, or `period` is
/// not a positive number.
pub fn crit_power<V>(
    period: f64,
    times: &[f64],
    watts: &[V],
) -> AnalyticsResult<Option<PeakResult<TimeWeightedWindow>>>
where
    V: Copy + Into<Option<f64>>,
{
    match GapPolicy::from_times(times) {
        Some(gaps) => crit_power_with_gaps(period, times, watts, gaps),
        None => Ok(None),
    }
}

/// Highest average power for `period` seconds with a known gap policy.
pub fn crit_power_with_gaps<V>(
    period: f64,
    times: &[f64],
    watts: &[V],
    gaps: GapPolicy,
) -> AnalyticsResult<Option<PeakResult<TimeWeightedWindow>>>
where
    V: Copy + Into<Option<f64>>,
{
    if !is_searchable_span(period) {
        return Ok(None);
    }
    let result = find_peak(
        TimeWeightedWindow::new(period, gaps),
        Peak::Maximize,
        times,
        watts,
    )?;
    tracing::debug!(period, found = result.is_some(), "critical power search");
    Ok(result)
}

/// Fastest pace (lowest seconds per meter) held over `distance` meters.
pub fn best_pace<V>(
    distance: f64,
    times: &[f64],
    distances: &[V],
) -> AnalyticsResult<Option<PeakResult<DistanceWeightedWindow>>>
where
    V: Copy + Into<Option<f64>>,
{
    if times.len() < 2 || !is_searchable_span(distance) {
        return Ok(None);
    }
    let result = find_peak(
        DistanceWeightedWindow::new(distance),
        Peak::Minimize,
        times,
        distances,
    )?;
    tracing::debug!(distance, found = result.is_some(), "best pace search");
    Ok(result)
}

/// Whole-selection time-weighted power with dropouts counted as zero.
///
/// Either gap may be given to override the value derived from `times`.
/// Returns `None` when fewer than two timestamps are available.
pub fn corrected_power<V>(
    times: &[f64],
    watts: &[V],
    ideal_gap: Option<f64>,
    max_gap: Option<f64>,
) -> AnalyticsResult<Option<TimeWeightedWindow>>
where
    V: Copy + Into<Option<f64>>,
{
    if times.len() < 2 {
        return Ok(None);
    }
    let Some(gaps) = GapPolicy::resolve(times, ideal_gap, max_gap) else {
        return Ok(None);
    };
    let mut roll = TimeWeightedWindow::unbounded(gaps);
    roll.import(times, watts)?;
    Ok(Some(roll))
}
