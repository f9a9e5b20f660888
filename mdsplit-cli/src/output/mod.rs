//! Output formatting module

use anyhow::Result;
use mdsplit_api::ChunkDTO;
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Emit one chunk of the input named `source`
    fn format_chunk(&mut self, source: &str, chunk: &ChunkDTO) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Chunks separated by a separator line
    Text,
    /// JSON array of chunks with offsets and cut kinds
    Json,
    /// One Markdown section per chunk
    Markdown,
}

/// Destination for formatted output
pub type Sink = Box<dyn Write + Send + Sync>;

/// Build the formatter for `format`
pub fn create_formatter(
    format: OutputFormat,
    writer: Sink,
    separator: &str,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer).with_separator(separator)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}
