//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use mdsplit_api::ChunkDTO;
use std::io::Write;

/// One heading per chunk, followed by the chunk verbatim
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    chunk_count: usize,
    hard_cuts: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunk_count: 0,
            hard_cuts: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_chunk(&mut self, source: &str, chunk: &ChunkDTO) -> Result<()> {
        self.chunk_count += 1;
        if chunk.cut == "hard" {
            self.hard_cuts += 1;
        }
        writeln!(
            self.writer,
            "## Chunk {} ({}, {} chars, {} cut)",
            self.chunk_count, source, chunk.char_len, chunk.cut
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", chunk.text)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Total chunks: {} ({} hard cuts)*",
            self.chunk_count, self.hard_cuts
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
