use super::normalizer::normalize;
use crate::core::{Column, Error, Result, ZoneDataset, ZoneRecord};
use serde::Serialize;
use tracing::debug;

/// Weights of the composite stress score.
///
/// AQI dominates as the primary health driver, waste is secondary and
/// temperature tertiary. The weights sum to 1.0 so a weighted sum of
/// normalized inputs stays in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StressWeights {
    pub aqi: f64,
    pub waste: f64,
    pub temperature: f64,
}

impl StressWeights {
    pub const STANDARD: StressWeights = StressWeights {
        aqi: 0.5,
        waste: 0.3,
        temperature: 0.2,
    };

    pub fn sum(&self) -> f64 {
        self.aqi + self.waste + self.temperature
    }

    pub fn combine(&self, aqi_norm: f64, waste_norm: f64, temp_norm: f64) -> f64 {
        self.aqi * aqi_norm + self.waste * waste_norm + self.temperature * temp_norm
    }
}

impl Default for StressWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Compute `stress_score` for every zone of the dataset.
///
/// AQI, waste index and temperature are each min-max normalized against the
/// current dataset, then combined with [`StressWeights::STANDARD`]. Humidity
/// is not an input. Any existing `risk_level` is cleared because it no longer
/// matches the new score.
pub fn calculate_stress_score(dataset: &ZoneDataset) -> Result<ZoneDataset> {
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let aqi = normalize(&dataset.column(Column::Aqi)?)?;
    let waste = normalize(&dataset.column(Column::WasteIndex)?)?;
    let temperature = normalize(&dataset.column(Column::Temperature)?)?;
    let weights = StressWeights::STANDARD;

    let scored: ZoneDataset = dataset
        .iter()
        .zip(aqi)
        .zip(waste)
        .zip(temperature)
        .map(|(((record, aqi_norm), waste_norm), temp_norm)| {
            let score = weights.combine(aqi_norm, waste_norm, temp_norm).clamp(0.0, 1.0);
            ZoneRecord {
                stress_score: Some(score),
                risk_level: None,
                ..record.clone()
            }
        })
        .collect();

    debug!(zones = scored.len(), "computed stress scores");
    Ok(scored)
}
