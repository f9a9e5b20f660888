//! Chunking orchestration for markup-aware text splitting
//!
//! This crate drives the boundary finders from `mdsplit-core` over a whole
//! document, applies the overflow policy when no balanced boundary fits,
//! and produces [`Chunk`]s that together reconstruct the input.
//!
//! # Example
//!
//! ```rust
//! use mdsplit_engine::{Chunker, ChunkerConfig, CutKind};
//!
//! let chunker = Chunker::new(ChunkerConfig::with_max_length(10)).unwrap();
//! let chunks = chunker.split("para one\n\npara two");
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].text, "para one");
//! assert_eq!(chunks[0].cut, CutKind::Paragraph);
//! ```

#![warn(missing_docs)]

pub mod chunker;
pub mod config;
pub mod error;
mod overflow;

// Re-export key types
pub use chunker::{Chunk, Chunker, ChunkerBuilder, CutKind};
pub use config::{ChunkerConfig, OverflowPolicy, DEFAULT_LOOKAHEAD, DEFAULT_MAX_LENGTH};
pub use error::{EngineError, Result};

// Re-export from core for convenience
pub use mdsplit_core::{BoundaryFinder, BoundaryKind, MarkupOptions};
