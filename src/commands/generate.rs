use crate::io::{generate_with_seed, write_dataset};
use anyhow::Result;
use std::path::Path;

pub fn generate_data(output: &Path, seed: Option<u64>) -> Result<()> {
    let dataset = generate_with_seed(seed);
    write_dataset(output, &dataset)?;
    println!(
        "Generated {} zones at {}",
        dataset.len(),
        output.display()
    );
    Ok(())
}
