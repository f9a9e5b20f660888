//! CLI command implementations

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use mdsplit_api::OverflowPolicy;

use crate::output::OutputFormat;

pub mod generate_config;
pub mod split;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split Markdown files into length-bounded chunks
    Split(split::SplitArgs),

    /// Write a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List overflow policies
    Policies,

    /// List output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Split(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::List { subcommand } => {
                for line in subcommand.lines() {
                    println!("{line}");
                }
                Ok(())
            }
        }
    }
}

impl ListCommands {
    /// One `name - description` line per entry
    pub fn lines(&self) -> Vec<String> {
        match self {
            ListCommands::Policies => OverflowPolicy::NAMES
                .iter()
                .map(|name| format!("{name} - {}", policy_description(name)))
                .collect(),
            ListCommands::Formats => OutputFormat::value_variants()
                .iter()
                .filter_map(|format| format.to_possible_value())
                .map(|value| {
                    let help = value.get_help().map(|h| h.to_string()).unwrap_or_default();
                    format!("{} - {}", value.get_name(), help)
                })
                .collect(),
        }
    }
}

fn policy_description(name: &str) -> &'static str {
    match name {
        "hard-cut" => "cut at the limit even inside a formatting span (default)",
        "lookahead" => "let the chunk grow to the next balanced boundary",
        "reopen" => "close open spans at the cut and re-open them in the next chunk",
        _ => "",
    }
}
