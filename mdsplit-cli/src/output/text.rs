//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use mdsplit_api::ChunkDTO;
use std::io::Write;

/// Writes chunk texts verbatim with a separator line between them
pub struct TextFormatter<W: Write> {
    writer: W,
    separator: String,
    written: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            separator: "---".to_string(),
            written: 0,
        }
    }

    /// Use a different separator line
    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_chunk(&mut self, _source: &str, chunk: &ChunkDTO) -> Result<()> {
        if self.written > 0 {
            writeln!(self.writer, "{}", self.separator)?;
        }
        writeln!(self.writer, "{}", chunk.text)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
