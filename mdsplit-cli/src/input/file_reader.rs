//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Reads inputs as UTF-8 text
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        log::debug!("Read {} bytes from {}", content.len(), path.display());
        Ok(content)
    }

    /// Read all of standard input
    pub fn read_stdin() -> Result<String> {
        Self::read_from(io::stdin().lock())
    }

    /// Read all of `reader`
    pub fn read_from<R: Read>(mut reader: R) -> Result<String> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Failed to read standard input")?;
        Ok(content)
    }
}
