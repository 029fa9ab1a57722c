//! Rolling window keyed by cumulative distance, used for pace.

use super::{RollingAggregator, Window};

/// Window over a cumulative distance channel.
///
/// The window is full once it spans `period` meters; its average is pace
/// in seconds per meter.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceWeightedWindow {
    window: Window,
}

impl DistanceWeightedWindow {
    /// Window spanning `period` meters.
    pub fn new(period: f64) -> Self {
        Self {
            window: Window::new(period),
        }
    }

    /// Distance covered by the active samples after skipping `skip` of them.
    ///
    /// `None` if either end of that range is a missing reading.
    pub fn distance_from(&self, skip: usize) -> Option<f64> {
        let values = self.window.raw_values();
        let start = values.get(self.window.offset() + skip)?.as_f64()?;
        let end = values.last()?.as_f64()?;
        Some(end - start)
    }

    /// Distance covered by the active window in meters.
    pub fn distance(&self) -> Option<f64> {
        self.distance_from(0)
    }
}

impl RollingAggregator for DistanceWeightedWindow {
    fn window(&self) -> &Window {
        &self.window
    }

    fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    fn is_full_from(&self, skip: usize) -> bool {
        self.distance_from(skip)
            .is_some_and(|distance| distance >= self.window.period())
    }

    /// Pace in seconds per meter.
    fn avg(&self) -> Option<f64> {
        let distance = self.distance()?;
        let elapsed = self.elapsed();
        if distance == 0.0 || elapsed == 0.0 {
            return None;
        }
        Some(elapsed / distance)
    }

    fn copy(&self) -> Self {
        Self {
            window: self.window.snapshot(),
        }
    }
}
