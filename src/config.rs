//! Athlete profile and analysis configuration.
//!
//! Loaded from `config.toml` in the platform data directory, or from an
//! explicit path. Every field has a default, so a partial file (or no file
//! at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::metrics::peaks::{STANDARD_PACE_DISTANCES, STANDARD_POWER_PERIODS};
use crate::metrics::power::Gender;
use crate::metrics::stats::DEFAULT_MIN_ALTITUDE_CHANGE;

/// Athlete data the derived metrics are relative to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AthleteProfile {
    /// Functional Threshold Power in watts
    pub ftp: Option<f64>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    pub gender: Gender,
}

impl AthleteProfile {
    /// Validate FTP value (50-600 watts).
    pub fn validate_ftp(ftp: f64) -> bool {
        (50.0..=600.0).contains(&ftp)
    }

    /// Validate weight value (30-200 kg).
    pub fn validate_weight(weight: f64) -> bool {
        (30.0..=200.0).contains(&weight)
    }
}

/// A labeled period (seconds) or distance (meters) to search peaks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSpan {
    pub label: String,
    pub value: f64,
}

impl LabeledSpan {
    fn table(entries: &[(&str, u32)]) -> Vec<Self> {
        entries
            .iter()
            .map(|&(label, value)| Self {
                label: label.to_string(),
                value: f64::from(value),
            })
            .collect()
    }
}

/// Analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Critical power durations
    pub power_periods: Vec<LabeledSpan>,
    /// Best pace distances
    pub pace_distances: Vec<LabeledSpan>,
    /// Known sample period, overriding the one derived from timestamps
    pub ideal_gap: Option<f64>,
    /// Known dropout threshold, overriding the derived one
    pub max_gap: Option<f64>,
    /// Points in each peak's preview graph
    pub graph_points: usize,
    /// Altitude changes smaller than this are ignored (meters)
    pub min_altitude_change: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            power_periods: LabeledSpan::table(STANDARD_POWER_PERIODS),
            pace_distances: LabeledSpan::table(STANDARD_PACE_DISTANCES),
            ideal_gap: None,
            max_gap: None,
            graph_points: 120,
            min_altitude_change: DEFAULT_MIN_ALTITUDE_CHANGE,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub athlete: AthleteProfile,
    pub analysis: AnalysisSettings,
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "ridemetrics", "RideMetrics")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the default configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load configuration from `path`, or from the default location.
///
/// A missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    if let Some(ftp) = config.athlete.ftp {
        if !AthleteProfile::validate_ftp(ftp) {
            tracing::warn!("FTP of {}W is outside the usual 50-600W range", ftp);
        }
    }
    if let Some(weight) = config.athlete.weight_kg {
        if !AthleteProfile::validate_weight(weight) {
            tracing::warn!("Weight of {}kg is outside the usual 30-200kg range", weight);
        }
    }

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Save configuration to `path`.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
