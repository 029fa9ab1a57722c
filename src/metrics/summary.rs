//! Summary records for a peak interval or a whole selection.
//!
//! These are the plain values handed to presentation and export layers;
//! formatting and unit conversion happen there.

use serde::Serialize;

use super::error::AnalyticsResult;
use super::peaks::{corrected_power, PeakResult};
use super::power::{calc_np, calc_tss, intensity_factor, rank, Rank};
use super::rolling::{DistanceWeightedWindow, RollingAggregator, TimeWeightedWindow};
use super::stats;
use crate::config::AthleteProfile;

/// Shortest critical power period that reports VAM.
pub const PEAK_VAM_MIN_PERIOD: f64 = 300.0;

/// Shortest selection that reports VAM; 300 samples at 1 Hz span 299 s.
pub const SELECTION_VAM_MIN_ELAPSED: f64 = 299.0;

/// Climbing over an interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElevationStats {
    pub gain: f64,
    pub loss: f64,
    /// Meters climbed per hour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vam: Option<f64>,
}

impl ElevationStats {
    /// Gain and loss of `altitude`, with VAM over `vam_span` seconds when
    /// given. `None` for an empty series.
    pub fn from_altitude(altitude: &[f64], min_change: f64, vam_span: Option<f64>) -> Option<Self> {
        if altitude.is_empty() {
            return None;
        }
        let stats::ElevationChange { gain, loss } = stats::altitude_changes(altitude, min_change);
        Some(Self {
            gain,
            loss,
            vam: vam_span.filter(|&s| s > 0.0).map(|s| gain / s * 3600.0),
        })
    }
}

/// Power figures for a critical power interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerIntervalStats {
    /// Time-weighted average power (watts).
    pub avg: Option<f64>,
    pub max: Option<f64>,
    /// Normalized Power, only for intervals long enough to have one.
    pub np: Option<f64>,
    pub kj: f64,
    /// Elapsed time of the interval (seconds).
    pub elapsed: f64,
    pub tss: Option<f64>,
    pub intensity: Option<f64>,
    pub w_kg: Option<f64>,
    pub rank: Option<Rank>,
}

impl PowerIntervalStats {
    /// Summarize a critical power result for an athlete.
    ///
    /// TSS and intensity use NP when available and the plain average
    /// otherwise.
    pub fn from_peak(peak: &PeakResult<TimeWeightedWindow>, athlete: &AthleteProfile) -> Self {
        let avg = peak.avg();
        let np = calc_np(&peak.raw_values);
        let adjusted = np.or(avg);
        let elapsed = peak.elapsed();

        let ftp = athlete.ftp.filter(|&ftp| ftp > 0.0);
        let tss = ftp.zip(adjusted).map(|(ftp, p)| calc_tss(p, elapsed, ftp));
        let intensity = ftp.zip(adjusted).map(|(ftp, p)| intensity_factor(p, ftp));

        let w_kg = athlete
            .weight_kg
            .filter(|&kg| kg > 0.0)
            .zip(avg)
            .map(|(kg, p)| p / kg);
        let rank = w_kg.and_then(|w| rank(peak.period, w, athlete.gender));

        Self {
            avg,
            max: stats::max(&peak.raw_values),
            np,
            kj: peak.kj(),
            elapsed,
            tss,
            intensity,
            w_kg,
            rank,
        }
    }
}

/// Pace figures for a best pace interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceIntervalStats {
    /// Seconds per meter.
    pub pace: Option<f64>,
    /// Meters per second.
    pub speed: Option<f64>,
    pub elapsed: f64,
    pub distance: Option<f64>,
}

impl PaceIntervalStats {
    pub fn from_peak(peak: &PeakResult<DistanceWeightedWindow>) -> Self {
        let pace = peak.avg();
        Self {
            pace,
            speed: pace.filter(|&p| p > 0.0).map(|p| 1.0 / p),
            elapsed: peak.elapsed(),
            distance: peak.distance(),
        }
    }
}

/// Power figures for a whole selection.
///
/// "Elapsed" figures count dropouts as zero watts over the full time span;
/// "moving" figures use only the recorded samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionStats {
    pub elapsed: f64,
    pub moving_time: f64,
    pub elapsed_power: Option<f64>,
    pub elapsed_np: Option<f64>,
    pub moving_power: Option<f64>,
    pub moving_np: Option<f64>,
    pub kj: f64,
    pub kj_per_hour: Option<f64>,
    /// Set by [`SelectionStats::with_altitude`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<ElevationStats>,
}

impl SelectionStats {
    /// Summarize a selection. `None` with fewer than two samples.
    pub fn from_streams(
        times: &[f64],
        watts: &[Option<f64>],
        ideal_gap: Option<f64>,
        max_gap: Option<f64>,
    ) -> AnalyticsResult<Option<Self>> {
        let Some(roll) = corrected_power(times, watts, ideal_gap, max_gap)? else {
            return Ok(None);
        };

        let elapsed = roll.elapsed();
        let corrected: Vec<f64> = roll.values().iter().filter_map(|v| v.as_f64()).collect();
        let recorded: Vec<f64> = watts.iter().filter_map(|w| *w).collect();
        let kj = roll.kj();

        Ok(Some(Self {
            elapsed,
            moving_time: stats::moving_time(times, None),
            elapsed_power: roll.avg().filter(|p| p.is_finite()),
            elapsed_np: calc_np(&corrected),
            moving_power: stats::avg(&recorded),
            moving_np: calc_np(watts),
            kj,
            kj_per_hour: (elapsed > 0.0).then(|| kj / elapsed * 3600.0),
            elevation: None,
        }))
    }

    /// Attach climbing over the selection's altitude samples.
    pub fn with_altitude(mut self, altitude: &[f64], min_change: f64) -> Self {
        let vam_span = Some(self.elapsed).filter(|&e| e >= SELECTION_VAM_MIN_ELAPSED);
        self.elevation = ElevationStats::from_altitude(altitude, min_change, vam_span);
        self
    }
}
