//! Generate config command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use mdsplit_api::{Config, DEFAULT_LOOKAHEAD};
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Platform whose message limit the template starts from
    #[arg(short, long, value_enum, default_value = "telegram")]
    pub preset: Preset,
}

/// Message limit presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 4000 characters
    Telegram,
    /// 2000 characters
    Discord,
}

impl Preset {
    fn config(self) -> Config {
        match self {
            Preset::Telegram => Config::telegram(),
            Preset::Discord => Config::discord(),
        }
    }
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating configuration template...");
        println!("  Preset: {:?}", self.preset);
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, self.generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the limits and policy to suit your platform");
        println!("2. Validate your configuration:");
        println!("   mdsplit validate -c {}", self.output.display());
        println!("3. Use it for splitting:");
        println!("   mdsplit split -i input.md -c {}", self.output.display());

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        let config = self.preset.config();
        format!(
            r#"# mdsplit configuration ({preset:?} preset)

[splitting]
# Maximum chunk length in characters
max_length = {max_length}

# What to do when no boundary with balanced formatting fits:
#   "hard-cut"  cut at the limit, even inside **bold** or a code block
#   "lookahead" let the chunk grow up to `lookahead` extra characters
#   "reopen"    close open markers at the cut and re-open them in the next chunk
overflow = "{overflow}"

# Extra characters the lookahead policy may use
lookahead = {lookahead}

# Treat $...$ and $$...$$ as math spans
math = {math}

[output]
# Default output format: "text", "json" or "markdown"
format = "text"

# Line printed between chunks in text output
separator = "---"
"#,
            preset = self.preset,
            max_length = config.max_length(),
            overflow = config.overflow().name(),
            lookahead = DEFAULT_LOOKAHEAD,
            math = config.math(),
        )
    }
}
