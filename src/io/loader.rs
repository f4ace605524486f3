//! CSV loading of zone data.
//!
//! Expected header: `zone,AQI,waste_index,temperature,humidity`. Header
//! matching ignores case and surrounding whitespace; unknown columns are
//! skipped and `humidity` may be omitted.

use crate::core::{Column, Error, Result, ZoneDataset, ZoneRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const ZONE_HEADER: &str = "zone";

/// Columns a data file must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    ZONE_HEADER,
    Column::Aqi.header(),
    Column::WasteIndex.header(),
    Column::Temperature.header(),
];

struct HeaderIndex {
    zone: usize,
    aqi: usize,
    waste_index: usize,
    temperature: usize,
    humidity: Option<usize>,
}

impl HeaderIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let required = |name: &str| locate(headers, name).ok_or_else(|| Error::missing_column(name));
        Ok(Self {
            zone: required(ZONE_HEADER)?,
            aqi: required(Column::Aqi.header())?,
            waste_index: required(Column::WasteIndex.header())?,
            temperature: required(Column::Temperature.header())?,
            humidity: locate(headers, Column::Humidity.header()),
        })
    }
}

fn locate(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Load a dataset from a CSV file.
pub fn load_dataset(path: &Path) -> Result<ZoneDataset> {
    if !path.exists() {
        return Err(Error::file_system(
            format!(
                "Data file not found at {}. Run `urban-stress generate` first",
                path.display()
            ),
            path,
        ));
    }

    let file = File::open(path).map_err(|e| Error::FileSystem {
        message: format!("Failed to open {}", path.display()),
        path: Some(path.to_path_buf()),
        source: Some(e),
    })?;

    let dataset = read_dataset(file)?;
    log::debug!("Loaded {} zones from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parse a dataset from any CSV reader.
///
/// Fails with `MissingColumn` for an absent required header, `EmptyDataset`
/// for a header-only file, and `Parse` for non-numeric or non-finite cells,
/// blank or duplicate zone names.
pub fn read_dataset<R: Read>(reader: R) -> Result<ZoneDataset> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let index = HeaderIndex::from_headers(csv_reader.headers()?)?;

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());
        let record = parse_row(&row, &index, line)?;
        if !seen.insert(record.zone.clone()) {
            return Err(Error::parse(
                line,
                format!("duplicate zone '{}'", record.zone),
            ));
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(Error::EmptyDataset);
    }
    Ok(ZoneDataset::new(records))
}

fn parse_row(row: &StringRecord, index: &HeaderIndex, line: u64) -> Result<ZoneRecord> {
    let zone = cell(row, index.zone, ZONE_HEADER, line)?;
    if zone.is_empty() {
        return Err(Error::parse(line, "zone name is blank"));
    }

    let mut record = ZoneRecord::new(
        zone,
        number(row, index.aqi, Column::Aqi, line)?,
        number(row, index.waste_index, Column::WasteIndex, line)?,
        number(row, index.temperature, Column::Temperature, line)?,
    );
    if let Some(i) = index.humidity {
        if !cell(row, i, Column::Humidity.header(), line)?.is_empty() {
            record.humidity = Some(number(row, i, Column::Humidity, line)?);
        }
    }
    Ok(record)
}

fn cell<'r>(row: &'r StringRecord, i: usize, name: &str, line: u64) -> Result<&'r str> {
    row.get(i)
        .ok_or_else(|| Error::parse(line, format!("missing value for '{name}'")))
}

fn number(row: &StringRecord, i: usize, column: Column, line: u64) -> Result<f64> {
    let raw = cell(row, i, column.header(), line)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::parse(
            line,
            format!("column '{}' has non-numeric value '{}'", column.header(), raw),
        )),
    }
}
