//! Whole-activity analysis: every configured peak plus activity totals.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::AppConfig;
use crate::metrics::error::AnalyticsResult;
use crate::metrics::gaps::GapPolicy;
use crate::metrics::peaks::{best_pace, crit_power_with_gaps};
use crate::metrics::power::{calc_np, calc_tss, intensity_factor};
use crate::metrics::resample::resample;
use crate::metrics::stats;
use crate::metrics::summary::{
    ElevationStats, PaceIntervalStats, PowerIntervalStats, SelectionStats, PEAK_VAM_MIN_PERIOD,
};
use crate::streams::{ActivityStreams, Channel};

/// Distance deltas at or below this (meters) are GPS jitter, not movement.
const MIN_PACE_DISTANCE: f64 = 0.1;

/// Slower paces (seconds per meter) are standing still and not reported as
/// an interval's slowest pace.
const MAX_REPORTED_PACE: f64 = 2.0;

/// Run cadence channels count one foot; steps count both.
const STEPS_PER_STRIDE: f64 = 2.0;

/// Min, mean and max of a channel over an interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl RangeStats {
    fn of(values: &[f64]) -> Option<Self> {
        Some(Self {
            min: stats::min(values)?,
            avg: stats::avg(values)?,
            max: stats::max(values)?,
        })
    }
}

/// A critical power entry.
#[derive(Debug, Clone, Serialize)]
pub struct PowerPeak {
    pub label: String,
    pub period: f64,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub stats: PowerIntervalStats,
    pub heartrate: Option<RangeStats>,
    pub cadence: Option<f64>,
    pub elevation: Option<ElevationStats>,
    /// Power samples fitted to the preview size.
    pub graph: Vec<f64>,
}

/// A best pace entry.
#[derive(Debug, Clone, Serialize)]
pub struct PacePeak {
    pub label: String,
    pub distance: f64,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub stats: PaceIntervalStats,
    /// Fastest per-sample pace in the interval (seconds per meter).
    pub pace_min: Option<f64>,
    /// Slowest per-sample pace, unless slower than walking.
    pub pace_max: Option<f64>,
    pub heartrate: Option<RangeStats>,
    /// Steps per minute.
    pub cadence: Option<f64>,
    pub elevation: Option<ElevationStats>,
    /// Pace samples (seconds per meter) fitted to the preview size.
    pub graph: Vec<f64>,
}

/// Everything derived from one activity.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityReport {
    pub generated_at: DateTime<Utc>,
    pub samples: usize,
    pub duration: f64,
    pub gaps: Option<GapPolicy>,
    pub np: Option<f64>,
    pub tss: Option<f64>,
    pub intensity: Option<f64>,
    pub selection: Option<SelectionStats>,
    pub critical_power: Vec<PowerPeak>,
    pub best_pace: Vec<PacePeak>,
}

/// Run every configured query over an activity.
pub fn analyze(streams: &ActivityStreams, config: &AppConfig) -> AnalyticsResult<ActivityReport> {
    streams.validate()?;
    let settings = &config.analysis;
    let athlete = &config.athlete;
    let times = &streams.time;
    let gaps = GapPolicy::resolve(times, settings.ideal_gap, settings.max_gap);

    let mut report = ActivityReport {
        generated_at: Utc::now(),
        samples: times.len(),
        duration: streams.duration(),
        gaps,
        np: None,
        tss: None,
        intensity: None,
        selection: None,
        critical_power: Vec::new(),
        best_pace: Vec::new(),
    };

    if let (Some(watts), Some(gaps)) = (streams.watts.as_deref(), gaps) {
        let altitude: Option<Vec<f64>> = streams
            .altitude
            .as_deref()
            .map(|alt| alt.iter().filter_map(|a| *a).collect());
        report.selection =
            SelectionStats::from_streams(times, watts, Some(gaps.ideal_gap), Some(gaps.max_gap))?
                .map(|selection| match &altitude {
                    Some(alt) => selection.with_altitude(alt, settings.min_altitude_change),
                    None => selection,
                });
        report.np = calc_np(watts);

        let adjusted = report
            .np
            .or_else(|| report.selection.as_ref().and_then(|s| s.elapsed_power));
        if let (Some(ftp), Some(power)) = (athlete.ftp.filter(|&f| f > 0.0), adjusted) {
            report.tss = Some(calc_tss(power, report.duration, ftp));
            report.intensity = Some(intensity_factor(power, ftp));
        }

        for span in &settings.power_periods {
            let Some(peak) = crit_power_with_gaps(span.value, times, watts, gaps)? else {
                continue;
            };
            let (start, end) = (peak.start_timestamp, peak.end_timestamp);
            report.critical_power.push(PowerPeak {
                label: span.label.clone(),
                period: span.value,
                start,
                end,
                stats: PowerIntervalStats::from_peak(&peak, athlete),
                heartrate: range_stats(streams, Channel::HeartRate, start, end),
                cadence: channel_range(streams, Channel::Cadence, start, end)
                    .and_then(|c| stats::avg(&c)),
                elevation: elevation(streams, start, end, Some(span.value), settings.min_altitude_change),
                graph: preview_graph(&peak.raw_values, settings.graph_points)?,
            });
        }
    }

    if let Some(distance) = streams.distance.as_deref() {
        let paces = pace_stream(times, distance);
        for span in &settings.pace_distances {
            let Some(peak) = best_pace(span.value, times, distance)? else {
                continue;
            };
            let (start, end) = (peak.start_timestamp, peak.end_timestamp);
            let interval_paces: Vec<f64> = match (start, end) {
                (Some(start), Some(end)) => times
                    .iter()
                    .zip(&paces)
                    .filter(|(ts, _)| **ts >= start && **ts <= end)
                    .filter_map(|(_, p)| *p)
                    .collect(),
                _ => Vec::new(),
            };
            report.best_pace.push(PacePeak {
                label: span.label.clone(),
                distance: span.value,
                start,
                end,
                stats: PaceIntervalStats::from_peak(&peak),
                pace_min: stats::min(&interval_paces),
                pace_max: stats::max(&interval_paces).filter(|&p| p < MAX_REPORTED_PACE),
                heartrate: range_stats(streams, Channel::HeartRate, start, end),
                cadence: channel_range(streams, Channel::Cadence, start, end)
                    .and_then(|c| stats::avg(&c))
                    .map(|c| c * STEPS_PER_STRIDE),
                elevation: elevation(streams, start, end, None, settings.min_altitude_change),
                graph: preview_graph(&interval_paces, settings.graph_points)?,
            });
        }
    }

    tracing::info!(
        samples = report.samples,
        critical_power = report.critical_power.len(),
        best_pace = report.best_pace.len(),
        "Analyzed activity"
    );
    Ok(report)
}

/// Fit values into `points` for a preview graph.
///
/// Short series are used as-is; a single value makes no graph.
pub fn preview_graph(values: &[f64], points: usize) -> AnalyticsResult<Vec<f64>> {
    if values.len() > points {
        resample(values, points)
    } else if values.len() > 1 {
        Ok(values.to_vec())
    } else {
        Ok(Vec::new())
    }
}

/// Per-sample pace (seconds per meter) from cumulative distance.
///
/// Samples where the distance has not moved past jitter are buffered and
/// later filled with the pace of the movement that resolves them. That pace
/// is the time since the last counted sample over the distance moved since
/// it, so a stall is spread across every buffered sample instead of being
/// charged only to the final interval's time.
pub fn pace_stream(times: &[f64], distances: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut paces = vec![None; times.len()];
    let mut anchor: Option<(usize, f64)> = None;

    for (i, (&ts, &dist)) in times.iter().zip(distances).enumerate() {
        let Some(dist) = dist else {
            continue;
        };
        let Some((a, a_dist)) = anchor else {
            anchor = Some((i, dist));
            continue;
        };
        let moved = dist - a_dist;
        if moved > MIN_PACE_DISTANCE {
            let pace = (ts - times[a]) / moved;
            for slot in &mut paces[a + 1..=i] {
                *slot = Some(pace);
            }
            if a == 0 {
                paces[0] = Some(pace);
            }
            anchor = Some((i, dist));
        }
    }

    paces
}

fn channel_range(
    streams: &ActivityStreams,
    channel: Channel,
    start: Option<f64>,
    end: Option<f64>,
) -> Option<Vec<f64>> {
    streams.time_range(channel, start?, end?)
}

fn range_stats(
    streams: &ActivityStreams,
    channel: Channel,
    start: Option<f64>,
    end: Option<f64>,
) -> Option<RangeStats> {
    RangeStats::of(&channel_range(streams, channel, start, end)?)
}

fn elevation(
    streams: &ActivityStreams,
    start: Option<f64>,
    end: Option<f64>,
    period: Option<f64>,
    min_change: f64,
) -> Option<ElevationStats> {
    let altitude = channel_range(streams, Channel::Altitude, start, end)?;
    let vam_span = period.filter(|&p| p >= PEAK_VAM_MIN_PERIOD);
    ElevationStats::from_altitude(&altitude, min_change, vam_span)
}
