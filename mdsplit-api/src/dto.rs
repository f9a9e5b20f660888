//! Data Transfer Objects for API

use crate::error::{ApiError, Result};
use mdsplit_engine::{Chunk, CutKind};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Input source for splitting
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    /// Raw text string
    Text(String),
    /// File path
    File(PathBuf),
    /// Raw bytes (UTF-8)
    Bytes(Vec<u8>),
    /// Reader (not serializable)
    #[cfg_attr(feature = "serde", serde(skip))]
    Reader(Box<dyn Read>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<dyn Read>").finish(),
        }
    }
}

impl Input {
    /// Create input from text
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    /// Create input from file path
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Read the text content from the input
    pub fn read_text(self) -> Result<String> {
        match self {
            Input::Text(text) => Ok(text),
            Input::File(path) => fs::read_to_string(&path).map_err(ApiError::Io),
            Input::Bytes(bytes) => String::from_utf8(bytes).map_err(ApiError::Utf8),
            Input::Reader(mut reader) => {
                let mut buffer = String::new();
                reader.read_to_string(&mut buffer).map_err(ApiError::Io)?;
                Ok(buffer)
            }
        }
    }
}

/// One output chunk (serializable DTO)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkDTO {
    /// Position in the output sequence, from 0
    pub index: usize,
    /// Text to deliver
    pub text: String,
    /// Byte offset of the source slice
    pub start: usize,
    /// Byte offset one past the source slice
    pub end: usize,
    /// Whitespace bytes skipped after the slice
    pub separator_len: usize,
    /// Length of `text` in characters
    pub char_len: usize,
    /// How the chunk was ended (`paragraph`, `line`, `word`, `hard`, `final`)
    pub cut: String,
    /// Longer than the configured limit
    pub oversized: bool,
    /// Starts with re-opened markup
    pub continued: bool,
}

impl ChunkDTO {
    /// Convert an engine chunk
    pub fn from_chunk(index: usize, chunk: Chunk) -> Self {
        Self {
            index,
            text: chunk.text,
            start: chunk.start,
            end: chunk.end,
            separator_len: chunk.separator_len,
            char_len: chunk.char_len,
            cut: chunk.cut.name().to_string(),
            oversized: chunk.oversized,
            continued: chunk.continued,
        }
    }
}

/// Splitting metadata
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Total bytes in the input
    pub total_bytes: usize,
    /// Total characters in the input
    pub total_chars: usize,
    /// Number of chunks produced
    pub chunk_count: usize,
    /// Chunks ended by a hard cut
    pub hard_cuts: usize,
    /// Chunks longer than the limit
    pub oversized_chunks: usize,
    /// Configured limit in characters
    pub max_length: usize,
    /// Overflow policy name
    pub overflow: String,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl Metadata {
    /// Summarise a finished split
    pub fn from_chunks(
        text: &str,
        chunks: &[Chunk],
        max_length: usize,
        overflow: &str,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            total_bytes: text.len(),
            total_chars: text.chars().count(),
            chunk_count: chunks.len(),
            hard_cuts: chunks.iter().filter(|c| c.cut == CutKind::Hard).count(),
            oversized_chunks: chunks.iter().filter(|c| c.oversized).count(),
            max_length,
            overflow: overflow.to_string(),
            processing_time_ms,
        }
    }
}

/// Complete output with chunks and metadata
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Output {
    /// Chunks in delivery order
    pub chunks: Vec<ChunkDTO>,
    /// Splitting metadata
    pub metadata: Metadata,
}

impl Output {
    /// Chunk texts in order
    pub fn texts(&self) -> Vec<&str> {
        self.chunks.iter().map(|c| c.text.as_str()).collect()
    }

    /// Consume the output, keeping only the chunk texts
    pub fn into_texts(self) -> Vec<String> {
        self.chunks.into_iter().map(|c| c.text).collect()
    }

    /// Number of chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True when the input was empty
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Serialize to pretty JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
