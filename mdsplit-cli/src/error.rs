//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures
#[derive(Debug)]
pub enum CliError {
    /// Input file does not exist
    FileNotFound(String),
    /// Malformed glob pattern
    InvalidPattern(String),
    /// Unreadable or invalid configuration
    ConfigError(String),
    /// Splitting failed for an input
    SplitError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SplitError(msg) => write!(f, "Split error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
