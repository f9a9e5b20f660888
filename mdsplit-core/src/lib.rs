//! Span-balance tracking and boundary detection for markup-aware splitting
//!
//! This crate holds the pure algorithms behind `mdsplit`:
//!
//! - [`span`]: a resumable scanner that tracks open formatting spans
//!   (emphasis, spoilers, inline code, fenced code, math) and answers
//!   whether a prefix of text leaves any of them open.
//! - [`boundary`]: candidate cut positions (paragraph, line, word) inside a
//!   length-bounded window, each tagged with its span balance, and the
//!   finder strategies that pick one.
//!
//! # Example
//!
//! ```rust
//! use mdsplit_core::{find_boundary, is_balanced, BoundaryKind};
//!
//! assert!(is_balanced("**bold** and _italic_"));
//! assert!(!is_balanced("**bold and"));
//!
//! let boundary = find_boundary("para one\n\npara two", 10).unwrap();
//! assert_eq!(boundary.kind, BoundaryKind::Paragraph);
//! assert_eq!(boundary.offset, 8);
//! ```

#![warn(missing_docs)]

pub mod boundary;
pub mod span;

pub use boundary::{
    default_finders, find_boundary, Boundary, BoundaryFinder, BoundaryKind, LineFinder,
    ParagraphFinder, Window, WordFinder,
};
pub use span::{
    is_balanced, is_balanced_with, Delimiter, MarkupOptions, SpanKind, SpanScanner, SpanState,
};
