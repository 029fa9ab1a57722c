//! RideMetrics - activity stream analytics
//!
//! Turns raw, gap-prone sensor streams from an endurance activity into
//! performance metrics: time-weighted rolling averages, critical power and
//! best pace intervals, Normalized Power, TSS and power profile ranking.

pub mod analysis;
pub mod config;
pub mod metrics;
pub mod streams;

// Re-export commonly used types
pub use analysis::{analyze, ActivityReport};
pub use config::{AppConfig, AthleteProfile};
pub use metrics::{GapPolicy, PeakResult, RollingAggregator, TimeWeightedWindow};
pub use streams::ActivityStreams;
