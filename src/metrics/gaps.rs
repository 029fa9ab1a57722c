//! Sampling gap tolerances derived from a timestamp series.

use serde::{Deserialize, Serialize};

use super::stats;

/// How many median deltas a gap may span before it counts as a dropout.
pub const MAX_GAP_MEDIAN_FACTOR: f64 = 4.0;

/// Expected sample period and dropout threshold for one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapPolicy {
    /// Most common delta between samples (seconds).
    pub ideal_gap: f64,
    /// Gaps longer than this are sensor dropouts (seconds).
    pub max_gap: f64,
}

impl GapPolicy {
    /// Create a policy from known values, e.g. a fixed sensor rate.
    pub fn new(ideal_gap: f64, max_gap: f64) -> Self {
        Self { ideal_gap, max_gap }
    }

    /// Derive a policy from timestamps.
    ///
    /// Returns `None` with fewer than two timestamps; such a series has no
    /// elapsed time to reason about.
    pub fn from_times(times: &[f64]) -> Option<Self> {
        if times.len() < 2 {
            return None;
        }

        let deltas: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();
        let ideal_gap = stats::mode(&deltas)?;
        let max_gap = stats::median(&deltas)? * MAX_GAP_MEDIAN_FACTOR;

        tracing::debug!(ideal_gap, max_gap, samples = times.len(), "derived gap policy");
        Some(Self { ideal_gap, max_gap })
    }

    /// Replace either field with a caller-supplied value.
    pub fn with_overrides(self, ideal_gap: Option<f64>, max_gap: Option<f64>) -> Self {
        Self {
            ideal_gap: ideal_gap.unwrap_or(self.ideal_gap),
            max_gap: max_gap.unwrap_or(self.max_gap),
        }
    }

    /// Derive from timestamps, skipping the derivation entirely when both
    /// overrides are given.
    pub fn resolve(times: &[f64], ideal_gap: Option<f64>, max_gap: Option<f64>) -> Option<Self> {
        if let (Some(ideal_gap), Some(max_gap)) = (ideal_gap, max_gap) {
            return Some(Self::new(ideal_gap, max_gap));
        }
        Self::from_times(times).map(|g| g.with_overrides(ideal_gap, max_gap))
    }
}
