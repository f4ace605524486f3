use crate::core::{Error, Result};

/// Min-max scaler fitted to one column.
///
/// A zero-variance column (including a single value) carries no ranking
/// information, so every value maps to 0.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxNormalizer {
    min: f64,
    max: f64,
}

impl MinMaxNormalizer {
    pub fn from_column(column: &[f64]) -> Result<Self> {
        let (min, max) = column_range(column).ok_or(Error::EmptyDataset)?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let range = self.max - self.min;
        if range.is_finite() {
            (value - self.min) / range
        } else {
            // Span wider than f64::MAX: scale down before subtracting
            (value / 2.0 - self.min / 2.0) / (self.max / 2.0 - self.min / 2.0)
        }
    }
}

/// Scale a column to [0, 1] against its own min and max.
///
/// Output has the same length and order as the input. An empty column is an
/// `EmptyDataset` error rather than an empty result.
pub fn normalize(column: &[f64]) -> Result<Vec<f64>> {
    let normalizer = MinMaxNormalizer::from_column(column)?;
    Ok(column.iter().map(|&v| normalizer.normalize(v)).collect())
}

fn column_range(column: &[f64]) -> Option<(f64, f64)> {
    column.iter().copied().fold(None, |range, value| match range {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}
