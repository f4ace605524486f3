//! Policy intervention transforms.
//!
//! Each intervention scales one raw metric uniformly across every zone and
//! returns a new dataset. Derived columns are copied through untouched and are
//! stale until [`pipeline::recalculate_stress`] runs again.

pub mod pipeline;

pub use pipeline::{assess, recalculate_stress, Scenario};

use crate::core::{ZoneDataset, ZoneRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A uniform percentage reduction of one raw metric.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum Intervention {
    WasteReduction(f64),
    EmissionControl(f64),
}

impl Intervention {
    pub fn percent(&self) -> f64 {
        match self {
            Self::WasteReduction(p) | Self::EmissionControl(p) => *p,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.percent() == 0.0
    }

    pub fn apply(&self, dataset: &ZoneDataset) -> ZoneDataset {
        match *self {
            Self::WasteReduction(percent) => simulate_waste_reduction(dataset, percent),
            Self::EmissionControl(percent) => simulate_emission_control(dataset, percent),
        }
    }
}

impl fmt::Display for Intervention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WasteReduction(p) => write!(f, "Waste reduction {p}%"),
            Self::EmissionControl(p) => write!(f, "Emission control {p}%"),
        }
    }
}

/// Reduce `waste_index` in every zone by `percent`.
///
/// `waste_index' = max(0, waste_index * (1 - percent / 100))`. Percentages
/// outside [0, 100] are accepted; the clamp keeps results non-negative. A NaN
/// percent yields a NaN column rather than zeros.
pub fn simulate_waste_reduction(dataset: &ZoneDataset, percent: f64) -> ZoneDataset {
    let factor = reduction_factor(percent);
    debug!(percent, "simulating waste reduction");
    dataset.map_records(|record| ZoneRecord {
        waste_index: reduce(record.waste_index, factor),
        ..record.clone()
    })
}

/// Reduce `aqi` in every zone by `percent`.
///
/// `aqi' = max(0, aqi * (1 - percent / 100))`.
pub fn simulate_emission_control(dataset: &ZoneDataset, percent: f64) -> ZoneDataset {
    let factor = reduction_factor(percent);
    debug!(percent, "simulating emission control");
    dataset.map_records(|record| ZoneRecord {
        aqi: reduce(record.aqi, factor),
        ..record.clone()
    })
}

fn reduction_factor(percent: f64) -> f64 {
    1.0 - percent / 100.0
}

fn reduce(value: f64, factor: f64) -> f64 {
    let scaled = value * factor;
    // f64::max would turn NaN into 0
    if scaled <= 0.0 {
        0.0
    } else {
        scaled
    }
}
