//! Time-weighted rolling average, the basis of every power figure.
//!
//! Each value is weighted by the time since the previous sample, so the
//! window's sum is energy (joules) and its average is mean power over the
//! elapsed time regardless of sample rate.

use super::{Ingest, RollingAggregator, Window, WindowValue};
use crate::metrics::gaps::GapPolicy;

/// Rolling time-weighted average with dropout bridging.
///
/// A power meter that goes silent is treated as producing zero watts. When
/// the gap to a new sample is a dropout, zeros are inserted at the ideal
/// sample period until the remaining gap is ordinary, so the average is not
/// inflated by time that silently went missing.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeWeightedWindow {
    window: Window,
    joules: f64,
    ideal_gap: f64,
    max_gap: f64,
}

impl TimeWeightedWindow {
    /// Window spanning `period` seconds.
    pub fn new(period: f64, gaps: GapPolicy) -> Self {
        if !(gaps.ideal_gap > 0.0 && gaps.ideal_gap.is_finite()) {
            tracing::warn!(
                ideal_gap = gaps.ideal_gap,
                "ideal gap is not a positive duration, dropout bridging disabled"
            );
        }
        Self {
            window: Window::new(period),
            joules: 0.0,
            ideal_gap: gaps.ideal_gap,
            max_gap: gaps.max_gap,
        }
    }

    /// Window that never fills and never evicts, for whole-selection averages.
    pub fn unbounded(gaps: GapPolicy) -> Self {
        Self::new(f64::INFINITY, gaps)
    }

    /// Gap policy the window bridges dropouts with.
    pub fn gaps(&self) -> GapPolicy {
        GapPolicy::new(self.ideal_gap, self.max_gap)
    }

    /// Time-weighted sum over the active window.
    pub fn joules(&self) -> f64 {
        self.joules
    }

    /// Energy over the active window in kilojoules.
    pub fn kj(&self) -> f64 {
        self.joules / 1000.0
    }

    fn bridging_enabled(&self) -> bool {
        self.ideal_gap > 0.0 && self.ideal_gap.is_finite()
    }

    /// Timestamp of the pad needed before a sample at `ts`, if any.
    fn pad_before(&self, ts: f64) -> Option<f64> {
        if !self.bridging_enabled() {
            return None;
        }
        let (last_ts, last_value) = self.window.last()?;
        let gap = ts - last_ts;
        if gap > self.max_gap || (gap > self.ideal_gap && last_value.is_pad()) {
            Some(last_ts + self.ideal_gap)
        } else {
            None
        }
    }
}

impl RollingAggregator for TimeWeightedWindow {
    fn window(&self) -> &Window {
        &self.window
    }

    fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    fn is_full_from(&self, skip: usize) -> bool {
        self.window.elapsed_from(skip) >= self.window.period()
    }

    /// Mean power. Non-finite when no time has elapsed.
    fn avg(&self) -> Option<f64> {
        Some(self.joules / self.elapsed())
    }

    fn copy(&self) -> Self {
        Self {
            window: self.window.snapshot(),
            joules: self.joules,
            ideal_gap: self.ideal_gap,
            max_gap: self.max_gap,
        }
    }

    fn accept(&mut self, ts: f64, value: WindowValue) {
        let gap = match self.window.last() {
            Some((last_ts, _)) => ts - last_ts,
            None => 0.0,
        };
        self.joules += value.as_f64().unwrap_or(0.0) * gap;
    }

    fn on_evict(&mut self) {
        // The sample after the head loses the weight of the interval
        // between them once the head is gone.
        let i = self.window.offset();
        let times = self.window.times();
        if i + 1 >= times.len() {
            return;
        }
        let gap = times[i + 1] - times[i];
        let value = self.window.raw_values()[i + 1].as_f64().unwrap_or(0.0);
        self.joules -= value * gap;
    }

    fn add(&mut self, ts: f64, value: Option<f64>) -> Ingest {
        if let Some(pad_ts) = self.pad_before(ts) {
            self.push(pad_ts, WindowValue::SyntheticZero);
            return Ingest::Padded;
        }
        self.push(ts, WindowValue::from(value));
        Ingest::Consumed
    }
}
