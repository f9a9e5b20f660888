//! Configuration file support
//!
//! A TOML file with two optional sections:
//!
//! ```toml
//! [splitting]
//! max_length = 4000
//! overflow = "hard-cut"   # hard-cut | lookahead | reopen
//! lookahead = 500
//! math = true
//!
//! [output]
//! format = "text"         # text | json | markdown
//! separator = "---"
//! ```

use crate::error::CliError;
use anyhow::{Context, Result};
use mdsplit_api::{Config, OverflowPolicy, DEFAULT_LOOKAHEAD, DEFAULT_MAX_LENGTH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Splitting configuration
    #[serde(default)]
    pub splitting: SplittingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Splitting-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SplittingConfig {
    /// Maximum chunk length in characters
    pub max_length: usize,

    /// Overflow policy name
    pub overflow: String,

    /// Extra characters the lookahead policy may use
    pub lookahead: usize,

    /// Track `$...$` and `$$...$$` math spans
    pub math: bool,
}

impl Default for SplittingConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            overflow: OverflowPolicy::default().name().to_string(),
            lookahead: DEFAULT_LOOKAHEAD,
            math: true,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Line printed between chunks in text output
    pub separator: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            separator: "---".to_string(),
        }
    }
}

impl CliConfig {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.message().to_string()).into())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Overflow policy described by the `[splitting]` section
    pub fn overflow_policy(&self) -> Result<OverflowPolicy> {
        OverflowPolicy::from_name(&self.splitting.overflow, self.splitting.lookahead)
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Validated splitter configuration
    pub fn to_api_config(&self) -> Result<Config> {
        Config::builder()
            .max_length(self.splitting.max_length)
            .overflow(self.overflow_policy()?)
            .math(self.splitting.math)
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}
