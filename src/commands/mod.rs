//! CLI command implementations for urban-stress.
//!
//! Available commands:
//! - **generate**: Write a synthetic zone dataset
//! - **assess**: Score zones, optionally after interventions, and report
//! - **explain**: Plain-language explanation for a single zone
//! - **init**: Initialize a new configuration file

pub mod assess;
pub mod explain;
pub mod generate;
pub mod init;

pub use assess::{handle_assess, AssessConfig};
pub use explain::{explain_zone, ExplainConfig};
pub use generate::generate_data;
pub use init::init_config;

use crate::config::{UrbanStressConfig, DEFAULT_DATA_PATH};
use std::path::PathBuf;

/// Data file precedence: command line, then configuration, then the default.
pub fn resolve_data_path(arg: Option<PathBuf>, config: &UrbanStressConfig) -> PathBuf {
    arg.or_else(|| config.data_path())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}
