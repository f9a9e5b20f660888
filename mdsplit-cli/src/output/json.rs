//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use mdsplit_api::ChunkDTO;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Collects chunks and writes them as one pretty JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    chunks: Vec<ChunkRecord>,
}

/// One chunk together with the input it came from
#[derive(Debug, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Input name (`<stdin>` for standard input)
    pub source: String,
    /// Chunk fields
    #[serde(flatten)]
    pub chunk: ChunkDTO,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunks: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_chunk(&mut self, source: &str, chunk: &ChunkDTO) -> Result<()> {
        self.chunks.push(ChunkRecord {
            source: source.to_string(),
            chunk: chunk.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.chunks)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
