//! Activity streams: parallel per-channel arrays sharing one time axis.

use serde::{Deserialize, Serialize};

use crate::metrics::error::{AnalyticsError, AnalyticsResult};

/// A channel that can be sliced by time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Watts,
    Distance,
    Altitude,
    HeartRate,
    Cadence,
}

impl Channel {
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Watts => "watts",
            Channel::Distance => "distance",
            Channel::Altitude => "altitude",
            Channel::HeartRate => "heartrate",
            Channel::Cadence => "cadence",
        }
    }
}

/// Recorded streams of one activity.
///
/// `time` is in seconds and non-decreasing. Every other channel is optional
/// and, when present, has one entry per timestamp; `null` entries are
/// sensor dropouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityStreams {
    pub time: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watts: Option<Vec<Option<f64>>>,
    /// Cumulative distance in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Vec<Option<f64>>>,
    /// Altitude in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<Vec<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartrate: Option<Vec<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<Vec<Option<f64>>>,
}

impl ActivityStreams {
    /// Parse streams from JSON and check their shape.
    pub fn from_json_str(json: &str) -> AnalyticsResult<Self> {
        let streams: Self = serde_json::from_str(json)
            .map_err(|e| AnalyticsError::InvalidInput(format!("streams JSON: {e}")))?;
        streams.validate()?;
        Ok(streams)
    }

    /// Fail if any present channel is not aligned with `time`.
    pub fn validate(&self) -> AnalyticsResult<()> {
        for channel in [
            Channel::Watts,
            Channel::Distance,
            Channel::Altitude,
            Channel::HeartRate,
            Channel::Cadence,
        ] {
            if let Some(values) = self.channel(channel) {
                if values.len() != self.time.len() {
                    return Err(AnalyticsError::ShapeMismatch {
                        left: "time",
                        left_len: self.time.len(),
                        right: channel.name(),
                        right_len: values.len(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn channel(&self, channel: Channel) -> Option<&[Option<f64>]> {
        match channel {
            Channel::Watts => self.watts.as_deref(),
            Channel::Distance => self.distance.as_deref(),
            Channel::Altitude => self.altitude.as_deref(),
            Channel::HeartRate => self.heartrate.as_deref(),
            Channel::Cadence => self.cadence.as_deref(),
        }
    }

    /// Total elapsed time, 0 for fewer than two samples.
    pub fn duration(&self) -> f64 {
        match (self.time.first(), self.time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Non-null values of `channel` with timestamps in `[start, end]`.
    ///
    /// `None` if the channel was not recorded.
    pub fn time_range(&self, channel: Channel, start: f64, end: f64) -> Option<Vec<f64>> {
        let values = self.channel(channel)?;
        Some(
            self.time
                .iter()
                .zip(values)
                .filter(|(ts, _)| **ts >= start && **ts <= end)
                .filter_map(|(_, v)| *v)
                .collect(),
        )
    }
}
