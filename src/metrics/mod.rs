//! Metrics module: rolling windows, peak search and derived power metrics.

pub mod error;
pub mod gaps;
pub mod peaks;
pub mod power;
pub mod resample;
pub mod rolling;
pub mod stats;
pub mod summary;

pub use error::{AnalyticsError, AnalyticsResult};
pub use gaps::GapPolicy;
pub use peaks::{best_pace, corrected_power, crit_power, crit_power_with_gaps, Peak, PeakResult};
pub use power::{calc_np, calc_tss, rank, rank_requirements, Gender, Rank, RankRequirements};
pub use resample::resample;
pub use rolling::{
    DistanceWeightedWindow, Ingest, RollingAggregator, TimeWeightedWindow, Window, WindowValue,
};
pub use summary::{ElevationStats, PaceIntervalStats, PowerIntervalStats, SelectionStats};
