//! Input handling module

pub mod file_reader;
pub mod glob_resolver;

pub use file_reader::FileReader;
pub use glob_resolver::{resolve_inputs, resolve_patterns};

use anyhow::Result;
use std::path::PathBuf;

/// Name accepted by `-i` for standard input
pub const STDIN_MARKER: &str = "-";

/// One resolved input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl Source {
    /// Display name used in output and progress
    pub fn name(&self) -> String {
        match self {
            Source::Stdin => "<stdin>".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    /// Read the whole input as UTF-8
    pub fn read(&self) -> Result<String> {
        match self {
            Source::Stdin => FileReader::read_stdin(),
            Source::File(path) => FileReader::read_text(path),
        }
    }
}
