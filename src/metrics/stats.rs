//! Plain statistics over a single channel.
//!
//! These work on whole slices and are the reference the rolling windows are
//! checked against.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::gaps::GapPolicy;

/// Altitude changes below this many meters are treated as sensor noise.
pub const DEFAULT_MIN_ALTITUDE_CHANGE: f64 = 30.0;

/// Sum of all values.
pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

/// Arithmetic mean, `None` for an empty slice.
pub fn avg(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(sum(data) / data.len() as f64)
}

/// Largest value, `None` for an empty slice.
pub fn max(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}

/// Smallest value, `None` for an empty slice.
pub fn min(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::min)
}

/// Most frequent value.
///
/// When several values share the top count, the one that reached that count
/// first wins.
pub fn mode(data: &[f64]) -> Option<f64> {
    let mut counts: HashMap<u64, usize> = HashMap::with_capacity(data.len());
    let mut best: Option<(usize, f64)> = None;

    for &value in data {
        // -0.0 and 0.0 are the same delta
        let key = if value == 0.0 { 0 } else { value.to_bits() };
        let count = counts.entry(key).or_insert(0);
        *count += 1;

        match best {
            Some((top, _)) if top >= *count => {}
            _ => best = Some((*count, value)),
        }
    }

    best.map(|(_, value)| value)
}

/// Median, averaging the middle pair for even lengths.
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Time spent moving, in seconds.
///
/// With a `moving` channel, a delta counts when the sample closing it is
/// flagged as moving. Without one, a delta counts when it is within the
/// series' max gap, so long pauses in recording drop out.
pub fn moving_time(times: &[f64], moving: Option<&[bool]>) -> f64 {
    if times.len() < 2 {
        return 0.0;
    }

    let max_gap = match moving {
        Some(_) => None,
        None => GapPolicy::from_times(times).map(|g| g.max_gap),
    };

    let mut accumulated = 0.0;
    let mut last = times[0];
    for (i, &ts) in times.iter().enumerate() {
        let delta = ts - last;
        let counted = match (max_gap, moving) {
            (Some(max_gap), _) => delta <= max_gap,
            (None, Some(flags)) => flags.get(i).copied().unwrap_or(false),
            (None, None) => false,
        };
        if counted {
            accumulated += delta;
        }
        last = ts;
    }

    accumulated
}

/// Elevation gained and lost over an altitude stream, in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElevationChange {
    pub gain: f64,
    pub loss: f64,
}

/// Sum climbing and descending, ignoring changes smaller than `min_change`.
///
/// The final sample is always compared so a slow drift at the end of a
/// climb is not lost.
pub fn altitude_changes(altitude: &[f64], min_change: f64) -> ElevationChange {
    let mut change = ElevationChange::default();
    let Some(&first) = altitude.first() else {
        return change;
    };

    let mut last = first;
    for (i, &x) in altitude.iter().enumerate() {
        let is_final = i + 1 == altitude.len();
        if (x - last).abs() < min_change && !is_final {
            continue;
        }
        if x > last {
            change.gain += x - last;
        } else {
            change.loss += last - x;
        }
        last = x;
    }

    change
}
