use crate::core::{Error, ZoneDataset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scores strictly below this are Low.
pub const MODERATE_LOWER_BOUND: f64 = 0.4;
/// Scores strictly above this are High.
pub const HIGH_LOWER_BOUND: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,      // score < 0.4
    Moderate, // 0.4 <= score <= 0.7
    High,     // score > 0.7
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    /// Policy guidance attached to each tier.
    pub const fn recommendation(&self) -> &'static str {
        match self {
            Self::High => {
                "Immediate intervention is recommended to address elevated pollution and waste levels."
            }
            Self::Moderate => {
                "Monitoring is advised, with consideration for preventive measures to avoid escalation."
            }
            Self::Low => {
                "Current conditions are within acceptable ranges, but continued monitoring is recommended."
            }
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "moderate" => Ok(Self::Moderate),
            "high" => Ok(Self::High),
            other => Err(Error::Validation(format!("unknown risk level '{other}'"))),
        }
    }
}

/// Map a stress score to its risk tier.
///
/// Total over every `f64`: values outside [0, 1] follow the same thresholds,
/// and NaN falls through to High rather than passing as Low.
pub fn classify_risk(score: f64) -> RiskLevel {
    if score < MODERATE_LOWER_BOUND {
        RiskLevel::Low
    } else if score <= HIGH_LOWER_BOUND {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low_count: usize,
    pub moderate_count: usize,
    pub high_count: usize,
    pub total_zones: usize,
}

impl RiskDistribution {
    /// Count assessed zones per tier. Unassessed zones only add to the total.
    pub fn from_dataset(dataset: &ZoneDataset) -> Self {
        dataset.iter().fold(
            Self {
                total_zones: dataset.len(),
                ..Self::default()
            },
            |mut dist, record| {
                match record.risk_level {
                    Some(RiskLevel::Low) => dist.low_count += 1,
                    Some(RiskLevel::Moderate) => dist.moderate_count += 1,
                    Some(RiskLevel::High) => dist.high_count += 1,
                    None => {}
                }
                dist
            },
        )
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low_count,
            RiskLevel::Moderate => self.moderate_count,
            RiskLevel::High => self.high_count,
        }
    }

    /// All three tiers in Low, Moderate, High order, zero counts included.
    pub fn entries(&self) -> [(RiskLevel, usize); 3] {
        RiskLevel::ALL.map(|level| (level, self.count(level)))
    }
}
