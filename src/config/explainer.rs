//! Explainer configuration.
//!
//! ```toml
//! [explainer]
//! provider = "auto"        # auto | gemini | openai | template
//! timeout_seconds = 10
//! gemini_model = "gemini-1.5-flash"
//! openai_model = "gpt-3.5-turbo"
//! max_tokens = 150
//! ```
//!
//! API keys are never read from this file; they come from `GEMINI_API_KEY`
//! and `OPENAI_API_KEY`.

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplainerProvider {
    /// Gemini if its key is set, else OpenAI, else the template
    #[default]
    Auto,
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainerConfig {
    #[serde(default)]
    pub provider: ExplainerProvider,

    /// Per-request timeout for remote providers (default: 10)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Completion length cap for OpenAI (default: 150)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            provider: ExplainerProvider::default(),
            timeout_seconds: default_timeout_seconds(),
            gemini_model: default_gemini_model(),
            openai_model: default_openai_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl ExplainerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(Error::Configuration(
                "explainer timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(Error::Configuration(
                "explainer max_tokens must be greater than 0".to_string(),
            ));
        }
        if self.gemini_model.trim().is_empty() || self.openai_model.trim().is_empty() {
            return Err(Error::Configuration(
                "explainer model names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    150
}
