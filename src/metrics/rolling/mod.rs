//! Rolling windows over paired (timestamp, value) samples.
//!
//! A window keeps every sample it has been fed in its buffers and tracks the
//! start of the active region with an offset. When a new sample arrives the
//! head is advanced for as long as the window would still be full without
//! its oldest active sample, which always leaves one sample more than the
//! strict minimum. Time weighting needs that extra head sample: each value
//! is weighted by the delta to the sample before it.

pub mod distance;
pub mod time_weighted;

pub use distance::DistanceWeightedWindow;
pub use time_weighted::TimeWeightedWindow;

use serde::{Deserialize, Serialize};

use super::error::{AnalyticsError, AnalyticsResult};

/// A value as stored in a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WindowValue {
    /// A reading from the sensor.
    Real(f64),
    /// The sensor reported nothing for this timestamp.
    Missing,
    /// Zero inserted by the window to bridge a dropout.
    SyntheticZero,
}

impl WindowValue {
    /// Numeric value, with pads reading as zero and missing readings as `None`.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            WindowValue::Real(v) => Some(v),
            WindowValue::Missing => None,
            WindowValue::SyntheticZero => Some(0.0),
        }
    }

    /// Whether this value was inserted by the window rather than read.
    pub fn is_pad(self) -> bool {
        matches!(self, WindowValue::SyntheticZero)
    }
}

impl From<Option<f64>> for WindowValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => WindowValue::Real(v),
            None => WindowValue::Missing,
        }
    }
}

/// Outcome of a single `add` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// The offered sample was stored.
    Consumed,
    /// A pad was stored instead; offer the same sample again.
    Padded,
}

/// Sample buffers and the active-region offset shared by every window type.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    period: f64,
    times: Vec<f64>,
    values: Vec<WindowValue>,
    offset: usize,
}

impl Window {
    /// An empty window spanning `period`.
    pub fn new(period: f64) -> Self {
        Self {
            period,
            times: Vec::new(),
            values: Vec::new(),
            offset: 0,
        }
    }

    /// Span the window is trying to cover.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Index of the first active sample.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Every stored timestamp, including evicted history.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Every stored value, including evicted history.
    pub fn raw_values(&self) -> &[WindowValue] {
        &self.values
    }

    /// Number of active samples.
    pub fn len(&self) -> usize {
        self.times.len() - self.offset
    }

    /// Whether there are no active samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Active values.
    pub fn values(&self) -> &[WindowValue] {
        &self.values[self.offset..]
    }

    /// Most recently stored sample.
    pub fn last(&self) -> Option<(f64, WindowValue)> {
        Some((*self.times.last()?, *self.values.last()?))
    }

    /// Elapsed time across the active samples after skipping `skip` of them.
    pub fn elapsed_from(&self, skip: usize) -> f64 {
        let start = self.offset + skip;
        let len = self.times.len();
        if len <= start + 1 {
            return 0.0;
        }
        self.times[len - 1] - self.times[start]
    }

    /// Timestamp of the first active sample, optionally skipping pads.
    pub fn first_timestamp(&self, no_pad: bool) -> Option<f64> {
        (self.offset..self.times.len())
            .find(|&i| !no_pad || !self.values[i].is_pad())
            .map(|i| self.times[i])
    }

    /// Timestamp of the last sample, optionally skipping pads.
    pub fn last_timestamp(&self, no_pad: bool) -> Option<f64> {
        (self.offset..self.times.len())
            .rev()
            .find(|&i| !no_pad || !self.values[i].is_pad())
            .map(|i| self.times[i])
    }

    fn push(&mut self, ts: f64, value: WindowValue) {
        self.times.push(ts);
        self.values.push(value);
    }

    fn advance(&mut self) {
        self.offset += 1;
    }

    /// Copy holding at most one sample before the offset plus the active
    /// region. The retained head sample keeps time weighting at the window
    /// boundary exact.
    fn snapshot(&self) -> Self {
        let keep_from = self.offset.saturating_sub(1);
        Self {
            period: self.period,
            times: self.times[keep_from..].to_vec(),
            values: self.values[keep_from..].to_vec(),
            offset: self.offset.min(1),
        }
    }
}

/// Shared behaviour of rolling windows.
///
/// Implementors provide the window buffers, the "full" predicate and the
/// average. They can hook into ingestion (`accept`) and eviction
/// (`on_evict`) to maintain an accumulator.
pub trait RollingAggregator: Sized {
    fn window(&self) -> &Window;

    fn window_mut(&mut self) -> &mut Window;

    /// Whether the active samples, ignoring the first `skip` of them, span
    /// the period.
    fn is_full_from(&self, skip: usize) -> bool;

    /// The window's statistic.
    fn avg(&self) -> Option<f64>;

    /// Independent snapshot, see [`Window`] for what is retained.
    fn copy(&self) -> Self;

    /// Called before a sample is appended.
    fn accept(&mut self, _ts: f64, _value: WindowValue) {}

    /// Called before the head sample at the current offset is evicted.
    fn on_evict(&mut self) {}

    /// Offer one sample.
    fn add(&mut self, ts: f64, value: Option<f64>) -> Ingest {
        self.push(ts, WindowValue::from(value));
        Ingest::Consumed
    }

    /// Append a stored value and evict from the head.
    ///
    /// At least one active sample always remains.
    fn push(&mut self, ts: f64, value: WindowValue) {
        self.accept(ts, value);
        self.window_mut().push(ts, value);
        while self.window().len() > 1 && self.is_full_from(1) {
            self.shift();
        }
    }

    /// Evict the head sample.
    fn shift(&mut self) {
        self.on_evict();
        self.window_mut().advance();
    }

    fn is_full(&self) -> bool {
        self.is_full_from(0)
    }

    fn period(&self) -> f64 {
        self.window().period()
    }

    fn elapsed(&self) -> f64 {
        self.window().elapsed_from(0)
    }

    fn size(&self) -> usize {
        self.window().len()
    }

    fn values(&self) -> &[WindowValue] {
        self.window().values()
    }

    fn first_timestamp(&self, no_pad: bool) -> Option<f64> {
        self.window().first_timestamp(no_pad)
    }

    fn last_timestamp(&self, no_pad: bool) -> Option<f64> {
        self.window().last_timestamp(no_pad)
    }

    /// Feed a whole series.
    fn import<V>(&mut self, times: &[f64], values: &[V]) -> AnalyticsResult<()>
    where
        V: Copy + Into<Option<f64>>,
    {
        if times.len() != values.len() {
            return Err(AnalyticsError::times_values(times.len(), values.len()));
        }

        let mut i = 0;
        while i < times.len() {
            if self.add(times[i], values[i].into()) == Ingest::Consumed {
                i += 1;
            }
        }
        Ok(())
    }

    /// Feed a whole series, keeping a snapshot of the best full window.
    ///
    /// After every stored sample that leaves the window full, the current
    /// state replaces the held leader when there is none yet or when
    /// `comparator(current, leader)` is true. Returns `None` if the window
    /// never became full.
    fn import_reduce<V, F>(
        &mut self,
        times: &[f64],
        values: &[V],
        mut comparator: F,
    ) -> AnalyticsResult<Option<Self>>
    where
        V: Copy + Into<Option<f64>>,
        F: FnMut(&Self, &Self) -> bool,
    {
        if times.len() != values.len() {
            return Err(AnalyticsError::times_values(times.len(), values.len()));
        }

        let mut leader: Option<Self> = None;
        let mut i = 0;
        while i < times.len() {
            if self.add(times[i], values[i].into()) == Ingest::Consumed {
                i += 1;
            }
            if self.is_full() {
                let replace = match &leader {
                    Some(lead) => comparator(self, lead),
                    None => true,
                };
                if replace {
                    leader = Some(self.copy());
                }
            }
        }

        Ok(leader)
    }
}
