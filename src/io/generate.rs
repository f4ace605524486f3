//! Synthetic zone data.
//!
//! Ten zones, `Zone A` to `Zone J`, with values drawn from typical urban
//! ranges: AQI 50-300, waste index 20-90, temperature 15-40 °C (one decimal),
//! humidity 30-90 %.

use crate::core::{Column, Error, Result, ResultExt, ZoneDataset, ZoneRecord};
use crate::io::ensure_dir;
use crate::io::loader::ZONE_HEADER;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::Path;

pub const ZONE_COUNT: usize = 10;

pub fn zone_names() -> impl Iterator<Item = String> {
    (b'A'..).take(ZONE_COUNT).map(|c| format!("Zone {}", c as char))
}

pub fn generate_city_environment<R: Rng + ?Sized>(rng: &mut R) -> ZoneDataset {
    zone_names()
        .map(|zone| {
            let aqi = rng.gen_range(50..=300) as f64;
            let waste_index = rng.gen_range(20..=90) as f64;
            let temperature = (rng.gen_range(15.0..=40.0_f64) * 10.0).round() / 10.0;
            let humidity = rng.gen_range(30..=90) as f64;
            ZoneRecord::new(zone, aqi, waste_index, temperature).with_humidity(humidity)
        })
        .collect()
}

/// Seeded generation for reproducible data files; `None` uses OS entropy.
pub fn generate_with_seed(seed: Option<u64>) -> ZoneDataset {
    match seed {
        Some(seed) => generate_city_environment(&mut StdRng::seed_from_u64(seed)),
        None => generate_city_environment(&mut rand::thread_rng()),
    }
}

/// Write raw zone columns as CSV. Derived columns are not written.
pub fn write_csv<W: Write>(writer: W, dataset: &ZoneDataset) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        ZONE_HEADER,
        Column::Aqi.header(),
        Column::WasteIndex.header(),
        Column::Temperature.header(),
        Column::Humidity.header(),
    ])?;
    for record in dataset {
        csv_writer.write_record([
            record.zone.clone(),
            record.aqi.to_string(),
            record.waste_index.to_string(),
            record.temperature.to_string(),
            record.humidity.map(|h| h.to_string()).unwrap_or_default(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_dataset(path: &Path, dataset: &ZoneDataset) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let file = std::fs::File::create(path)
        .map_err(Error::from)
        .context(format!("Failed to create {}", path.display()))?;
    write_csv(file, dataset).context(format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {} zones to {}", dataset.len(), path.display());
    Ok(())
}
