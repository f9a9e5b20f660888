//! Validate command implementation

use crate::config::CliConfig;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match self.check() {
            Ok(summary) => {
                println!("✓ Configuration is valid!");
                for line in summary {
                    println!("  {line}");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }

    fn check(&self) -> Result<Vec<String>> {
        let config = CliConfig::from_file(&self.config)?;
        let api = config.to_api_config()?;
        if OutputFormat::from_str(&config.output.format, true).is_err() {
            anyhow::bail!(
                "unknown output format '{}', expected text, json or markdown",
                config.output.format
            );
        }

        Ok(vec![
            format!("Max length: {} characters", api.max_length()),
            format!("Overflow policy: {}", api.overflow().name()),
            format!("Math spans: {}", if api.math() { "on" } else { "off" }),
            format!("Output format: {}", config.output.format),
        ])
    }
}
