pub mod errors;

pub use errors::{Error, Result, ResultExt};

use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row per urban zone.
///
/// `stress_score` and `risk_level` are derived columns: they stay `None` until
/// the scoring pipeline runs and become stale once an intervention changes the
/// raw metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub zone: String,
    #[serde(rename = "AQI", alias = "aqi")]
    pub aqi: f64,
    pub waste_index: f64,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

impl ZoneRecord {
    pub fn new(zone: impl Into<String>, aqi: f64, waste_index: f64, temperature: f64) -> Self {
        Self {
            zone: zone.into(),
            aqi,
            waste_index,
            temperature,
            humidity: None,
            stress_score: None,
            risk_level: None,
        }
    }

    pub fn with_humidity(mut self, humidity: f64) -> Self {
        self.humidity = Some(humidity);
        self
    }

    /// Read a numeric column, `None` when the record has no value for it.
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Aqi => Some(self.aqi),
            Column::WasteIndex => Some(self.waste_index),
            Column::Temperature => Some(self.temperature),
            Column::Humidity => self.humidity,
            Column::StressScore => self.stress_score,
        }
    }

    /// True once both derived columns are present.
    pub fn is_assessed(&self) -> bool {
        self.stress_score.is_some() && self.risk_level.is_some()
    }
}

/// Numeric columns of a zone dataset, named by their source header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Aqi,
    WasteIndex,
    Temperature,
    Humidity,
    StressScore,
}

impl Column {
    pub const fn header(&self) -> &'static str {
        match self {
            Self::Aqi => "AQI",
            Self::WasteIndex => "waste_index",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::StressScore => "stress_score",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Ordered collection of zone records sharing one schema.
///
/// The whole dataset is the unit of computation: normalization is always
/// relative to the current min/max of each column, so records are never
/// scored in isolation. Transforms take `&ZoneDataset` and return a new one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneDataset {
    records: Vec<ZoneRecord>,
}

impl ZoneDataset {
    pub fn new(records: Vec<ZoneRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ZoneRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ZoneRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ZoneRecord> {
        self.records.iter()
    }

    pub fn find(&self, zone: &str) -> Option<&ZoneRecord> {
        self.records.iter().find(|r| r.zone == zone)
    }

    pub fn zones(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.zone.as_str()).collect()
    }

    /// Extract one column in record order.
    ///
    /// Fails with `MissingColumn` if any record has no value for it.
    pub fn column(&self, column: Column) -> Result<Vec<f64>> {
        self.records
            .iter()
            .map(|r| r.value(column).ok_or_else(|| Error::missing_column(column.header())))
            .collect()
    }

    /// Build a new dataset by transforming every record; `self` is untouched.
    pub fn map_records<F>(&self, f: F) -> ZoneDataset
    where
        F: FnMut(&ZoneRecord) -> ZoneRecord,
    {
        ZoneDataset::new(self.records.iter().map(f).collect())
    }

    /// True when every record carries a score and a level.
    pub fn is_assessed(&self) -> bool {
        self.records.iter().all(ZoneRecord::is_assessed)
    }
}

impl FromIterator<ZoneRecord> for ZoneDataset {
    fn from_iter<I: IntoIterator<Item = ZoneRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ZoneDataset {
    type Item = &'a ZoneRecord;
    type IntoIter = std::slice::Iter<'a, ZoneRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
