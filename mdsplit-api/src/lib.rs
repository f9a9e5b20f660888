//! Public API for markup-aware message splitting
//!
//! This crate provides a small, stable interface over the chunking engine:
//! a [`MarkdownSplitter`] configured through [`Config`], input and output
//! DTOs, and one-call convenience functions.
//!
//! ```rust
//! use mdsplit_api::split_markdown;
//!
//! let chunks = split_markdown("Hello world", 5).unwrap();
//! assert_eq!(chunks, vec!["Hello", "world"]);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;

use error::Result;
use mdsplit_engine::Chunker;
use std::sync::Arc;
use std::time::Instant;

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{ChunkDTO, Input, Metadata, Output};
pub use error::ApiError;
pub use mdsplit_core::is_balanced;
pub use mdsplit_engine::{OverflowPolicy, DEFAULT_LOOKAHEAD, DEFAULT_MAX_LENGTH};

/// Main entry point for splitting
///
/// Cheap to clone and safe to share between threads.
#[derive(Debug, Clone)]
pub struct MarkdownSplitter {
    inner: Arc<Chunker>,
    config: Config,
}

impl MarkdownSplitter {
    /// Create a splitter with the default configuration (4000 characters)
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create a splitter with a custom length limit
    pub fn with_max_length(max_length: usize) -> Result<Self> {
        Self::with_config(Config::builder().max_length(max_length).build()?)
    }

    /// Create a splitter with a custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let inner = Chunker::new(config.chunker_config())?;
        Ok(Self {
            inner: Arc::new(inner),
            config,
        })
    }

    /// Split the input and return chunks with metadata
    pub fn split(&self, input: Input) -> Result<Output> {
        let text = input.read_text()?;
        Ok(self.split_str(&text))
    }

    /// Split text directly (convenience method)
    pub fn split_text(&self, text: &str) -> Result<Output> {
        Ok(self.split_str(text))
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn split_str(&self, text: &str) -> Output {
        let start = Instant::now();
        let chunks = self.inner.split(text);
        let elapsed = start.elapsed();

        let metadata = Metadata::from_chunks(
            text,
            &chunks,
            self.config.max_length(),
            self.config.overflow().name(),
            elapsed.as_millis() as u64,
        );
        let chunks = chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| ChunkDTO::from_chunk(index, chunk))
            .collect();

        Output { chunks, metadata }
    }
}

impl Default for MarkdownSplitter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Chunker::default()),
            config: Config::default(),
        }
    }
}

// Convenience functions

/// Split `text` into chunks of at most `max_length` characters
///
/// Fails only when `max_length` is zero.
pub fn split_markdown(text: &str, max_length: usize) -> Result<Vec<String>> {
    let splitter = MarkdownSplitter::with_max_length(max_length)?;
    Ok(splitter.split_str(text).into_texts())
}

/// Split `text` with the default 4000-character limit
pub fn split_markdown_default(text: &str) -> Vec<String> {
    MarkdownSplitter::default().split_str(text).into_texts()
}

/// Split a file with the default configuration
pub fn split_file<P: AsRef<std::path::Path>>(path: P) -> Result<Output> {
    MarkdownSplitter::default().split(Input::from_file(path.as_ref().to_path_buf()))
}
