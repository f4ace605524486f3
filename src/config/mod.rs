//! Configuration loaded from `.urban-stress.toml`.
//!
//! The scoring weights and risk thresholds are fixed constants and have no
//! configuration section.

mod explainer;
mod loader;

pub use explainer::{ExplainerConfig, ExplainerProvider};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

use crate::io::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_PATH: &str = "data/city_environment.csv";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UrbanStressConfig {
    /// Zone data source
    #[serde(default)]
    pub data: Option<DataConfig>,

    /// Report output settings
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Text explainer settings
    #[serde(default)]
    pub explainer: Option<ExplainerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    pub default_format: Option<OutputFormat>,
}

impl UrbanStressConfig {
    pub fn data_path(&self) -> Option<PathBuf> {
        self.data.as_ref().and_then(|d| d.path.clone())
    }

    pub fn default_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.default_format)
    }

    pub fn explainer_config(&self) -> ExplainerConfig {
        self.explainer.clone().unwrap_or_default()
    }

    /// Resolve a relative data path against the directory holding the file.
    pub(crate) fn with_base_dir(mut self, base: Option<&Path>) -> Self {
        if let (Some(base), Some(data)) = (base, self.data.as_mut()) {
            if let Some(path) = data.path.as_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
        self
    }
}

/// Text written by `urban-stress init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# urban-stress configuration

[data]
path = "data/city_environment.csv"

[output]
default_format = "terminal"

[explainer]
# auto picks Gemini when GEMINI_API_KEY is set, then OpenAI (OPENAI_API_KEY),
# otherwise the built-in template.
provider = "auto"
timeout_seconds = 10
gemini_model = "gemini-1.5-flash"
openai_model = "gpt-3.5-turbo"
max_tokens = 150
"#;
