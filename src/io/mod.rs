pub mod generate;
pub mod loader;
pub mod output;

pub use generate::{generate_city_environment, generate_with_seed, write_csv, write_dataset};
pub use loader::{load_dataset, read_dataset};
pub use output::{create_writer, OutputFormat, OutputWriter};

use crate::core::{Error, Result};
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::FileSystem {
        message: format!("Failed to write {}", path.display()),
        path: Some(path.to_path_buf()),
        source: Some(e),
    })
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::FileSystem {
            message: format!("Failed to create directory {}", path.display()),
            path: Some(path.to_path_buf()),
            source: Some(e),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_write_file_into_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("out.txt");
        let err = write_file(&path, "x").unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
        assert!(!path.exists());
    }
}
