//! Derived power metrics: Normalized Power, TSS and power profile ranking.

use serde::{Deserialize, Serialize};

/// Fewer samples than this give no Normalized Power.
///
/// NP is not meaningful for short efforts; about 20 minutes at 1 Hz with
/// some allowance for dropouts.
pub const NP_MIN_SAMPLES: usize = 1000;

/// Rolling window for NP, in samples (30 s at 1 Hz).
pub const NP_ROLLING_SAMPLES: usize = 30;

/// Normalized Power.
///
/// NP = 4th root of the mean of (30-sample rolling average power)^4. The
/// window counts samples rather than seconds, so input is assumed to be
/// close to 1 Hz. Missing readings count as zero watts.
pub fn calc_np<V>(watts: &[V]) -> Option<f64>
where
    V: Copy + Into<Option<f64>>,
{
    if watts.len() < NP_MIN_SAMPLES {
        return None;
    }

    let mut rolling = [0.0f64; NP_ROLLING_SAMPLES];
    let mut index = 0;
    let mut sum = 0.0;
    let mut total = 0.0;
    let mut count = 0usize;

    for (i, &w) in watts.iter().enumerate() {
        let w = w.into().unwrap_or(0.0);
        sum += w - rolling[index];
        rolling[index] = w;
        index = (index + 1) % NP_ROLLING_SAMPLES;

        // Only full windows are accumulated
        if i + 1 >= NP_ROLLING_SAMPLES {
            total += (sum / NP_ROLLING_SAMPLES as f64).powi(4);
            count += 1;
        }
    }

    Some((total / count as f64).sqrt().sqrt())
}

/// Training Stress Score for `duration` seconds at `power` watts.
pub fn calc_tss(power: f64, duration: f64, ftp: f64) -> f64 {
    let joules = power * duration;
    let ftp_hour_joules = ftp * 3600.0;
    let intensity = power / ftp;
    ((joules * intensity) / ftp_hour_joules) * 100.0
}

/// Intensity Factor: power relative to FTP.
pub fn intensity_factor(power: f64, ftp: f64) -> f64 {
    power / ftp
}

/// Athlete gender, selecting the power profile curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{other}'")),
        }
    }
}

/// Constants of one log-sigmoid W/kg curve.
#[derive(Debug, Clone, Copy)]
struct RankCurve {
    slope_factor: f64,
    slope_period: f64,
    slope_adjust: f64,
    slope_offset: f64,
    base_offset: f64,
}

impl RankCurve {
    /// W/kg on this curve for an effort of `duration` seconds.
    fn scale(&self, duration: f64) -> f64 {
        let t = (self.slope_period / duration) * self.slope_adjust;
        let slope = (t + self.slope_offset).log10();
        slope.powf(self.slope_factor) + self.base_offset
    }
}

/// Top and bottom of the power profile for one gender.
struct RankCurves {
    high: RankCurve,
    low: RankCurve,
}

// Andy Coggan's power profile.
const MALE_CURVES: RankCurves = RankCurves {
    high: RankCurve {
        slope_factor: 2.82,
        slope_period: 2500.0,
        slope_adjust: 1.4,
        slope_offset: 3.6,
        base_offset: 6.08,
    },
    low: RankCurve {
        slope_factor: 2.0,
        slope_period: 3000.0,
        slope_adjust: 1.3,
        slope_offset: 1.0,
        base_offset: 1.74,
    },
};

const FEMALE_CURVES: RankCurves = RankCurves {
    high: RankCurve {
        slope_factor: 2.65,
        slope_period: 2500.0,
        slope_adjust: 1.0,
        slope_offset: 3.6,
        base_offset: 5.39,
    },
    low: RankCurve {
        slope_factor: 2.15,
        slope_period: 300.0,
        slope_adjust: 6.0,
        slope_offset: 1.5,
        base_offset: 1.4,
    },
};

impl Gender {
    fn curves(self) -> &'static RankCurves {
        match self {
            Gender::Male => &MALE_CURVES,
            Gender::Female => &FEMALE_CURVES,
        }
    }
}

/// One tier of the ranking table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankLevel {
    /// The level must exceed this to reach the tier.
    pub level_requirement: f64,
    pub label: &'static str,
    pub badge: Option<&'static str>,
}

/// Ranking tiers, best first.
pub const RANK_LEVELS: [RankLevel; 8] = [
    RankLevel {
        level_requirement: 7.0 / 8.0,
        label: "World Class",
        badge: Some("ranking/world-tour.png"),
    },
    RankLevel {
        level_requirement: 6.0 / 8.0,
        label: "Pro",
        badge: Some("ranking/pro.png"),
    },
    RankLevel {
        level_requirement: 5.0 / 8.0,
        label: "Cat 1",
        badge: Some("ranking/cat1.png"),
    },
    RankLevel {
        level_requirement: 4.0 / 8.0,
        label: "Cat 2",
        badge: Some("ranking/cat2.png"),
    },
    RankLevel {
        level_requirement: 3.0 / 8.0,
        label: "Cat 3",
        badge: Some("ranking/cat3.png"),
    },
    RankLevel {
        level_requirement: 2.0 / 8.0,
        label: "Cat 4",
        badge: Some("ranking/cat4.png"),
    },
    RankLevel {
        level_requirement: 1.0 / 8.0,
        label: "Cat 5",
        badge: Some("ranking/cat5.png"),
    },
    RankLevel {
        level_requirement: f64::NEG_INFINITY,
        label: "Recreational",
        badge: None,
    },
];

/// W/kg at the top and bottom of the power profile for a duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankRequirements {
    pub high: f64,
    pub low: f64,
}

/// Where an effort sits on the power profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rank {
    /// 0 at the bottom curve, 1 at the top curve; may fall outside.
    pub level: f64,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
}

/// Profile bounds for an effort of `duration` seconds.
pub fn rank_requirements(duration: f64, gender: Gender) -> RankRequirements {
    let curves = gender.curves();
    RankRequirements {
        high: curves.high.scale(duration),
        low: curves.low.scale(duration),
    }
}

/// Rank `w_kg` sustained for `duration` seconds.
///
/// Returns `None` only when the level is not a number (e.g. NaN input).
pub fn rank(duration: f64, w_kg: f64, gender: Gender) -> Option<Rank> {
    let RankRequirements { high, low } = rank_requirements(duration, gender);
    let level = (w_kg - low) / (high - low);
    RANK_LEVELS
        .iter()
        .find(|tier| level > tier.level_requirement)
        .map(|tier| Rank {
            level,
            label: tier.label,
            badge: tier.badge,
        })
}
