//! The chunking loop
//!
//! [`Chunker::split`] walks the document once. For every chunk it builds a
//! [`Window`] over the unprocessed suffix, asks the boundary finders for a
//! balanced cut, and falls back to the overflow policy. A single
//! [`SpanScanner`] is carried across chunks so span state is never re-derived
//! from the start of a chunk.

use crate::{
    config::{ChunkerConfig, OverflowPolicy},
    error::Result,
    overflow::{self, Cut},
};
use log::{debug, info, warn};
use mdsplit_core::{default_finders, BoundaryFinder, BoundaryKind, SpanScanner, Window};
use std::fmt;

/// How a chunk was ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutKind {
    /// At a blank line
    Paragraph,
    /// At a line break
    Line,
    /// At whitespace
    Word,
    /// Mid-text, at or inside the limit
    Hard,
    /// The rest of the document
    Final,
}

impl CutKind {
    /// Lowercase name used in logs and serialized output
    pub fn name(&self) -> &'static str {
        match self {
            CutKind::Paragraph => "paragraph",
            CutKind::Line => "line",
            CutKind::Word => "word",
            CutKind::Hard => "hard",
            CutKind::Final => "final",
        }
    }
}

impl From<BoundaryKind> for CutKind {
    fn from(kind: BoundaryKind) -> Self {
        match kind {
            BoundaryKind::Paragraph => CutKind::Paragraph,
            BoundaryKind::Line => CutKind::Line,
            BoundaryKind::Word => CutKind::Word,
            BoundaryKind::End => CutKind::Final,
        }
    }
}

impl fmt::Display for CutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One piece of the split document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Text to deliver
    pub text: String,
    /// Byte offset of the source slice in the document
    pub start: usize,
    /// Byte offset one past the source slice
    pub end: usize,
    /// Whitespace bytes after `end` that belong to no chunk
    pub separator_len: usize,
    /// Length of `text` in characters
    pub char_len: usize,
    /// How the chunk was ended
    pub cut: CutKind,
    /// Longer than the limit (lookahead policy only)
    pub oversized: bool,
    /// Starts with re-opened markup from the previous chunk
    pub continued: bool,
}

impl Chunk {
    /// Byte range of the source slice
    pub fn source_range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Splits documents into length-bounded, span-balanced chunks
pub struct Chunker {
    config: ChunkerConfig,
    finders: Vec<Box<dyn BoundaryFinder>>,
}

impl fmt::Debug for Chunker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.finders.iter().map(|finder| finder.name()).collect();
        f.debug_struct("Chunker")
            .field("config", &self.config)
            .field("finders", &names)
            .finish()
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            config: ChunkerConfig::default(),
            finders: default_finders(),
        }
    }
}

impl Chunker {
    /// Create a chunker with the default finder chain
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        Self::with_finders(config, default_finders())
    }

    /// Create a chunker with a custom finder chain, tried in order
    pub fn with_finders(
        config: ChunkerConfig,
        finders: Vec<Box<dyn BoundaryFinder>>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, finders })
    }

    /// Start building a chunker
    pub fn builder() -> ChunkerBuilder {
        ChunkerBuilder::new()
    }

    /// Configuration in effect
    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Split `text` into chunks
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let max_length = self.config.max_length;
        let mut chunks = Vec::new();
        let mut cursor = 0;
        let mut scanner = SpanScanner::new(self.config.markup);
        let mut scan_pos = 0;
        let mut prefix = String::new();

        while cursor < text.len() {
            let rest = &text[cursor..];
            let budget = max_length - prefix.chars().count();

            if rest.chars().nth(budget).is_none() {
                let closers = match self.config.overflow {
                    OverflowPolicy::Reopen => {
                        overflow::final_closers(&scanner, text, scan_pos, &prefix, rest, budget)
                    }
                    _ => Some(String::new()),
                };
                // Without room for its closers the tail goes through the window.
                if let Some(closers) = closers {
                    chunks.push(make_chunk(
                        &prefix,
                        rest,
                        &closers,
                        cursor,
                        0,
                        CutKind::Final,
                        false,
                    ));
                    break;
                }
            }

            let start = scan_pos - cursor;
            let window = Window::scan(
                rest,
                budget,
                self.config.overflow.lookahead(),
                &scanner,
                start,
            );
            let cut = self.choose_cut(&window, &scanner, start, &prefix);

            let chunk = make_chunk(
                &prefix,
                &rest[..cut.end],
                &cut.closers,
                cursor,
                cut.separator_len,
                cut.kind,
                cut.oversized,
            );
            debug!(
                "chunk {}: {} cut, {} chars, bytes {}..{}",
                chunks.len(),
                chunk.cut,
                chunk.char_len,
                chunk.start,
                chunk.end
            );
            chunks.push(chunk);

            let resume = cursor + cut.end + cut.separator_len;
            scan_pos = scanner.advance(text, scan_pos, resume);
            if cut.kind == CutKind::Hard && cut.closers.is_empty() && !scanner.is_balanced() {
                warn!(
                    "hard cut at byte {} splits open spans {:?}",
                    cursor + cut.end,
                    scanner.state().open_spans()
                );
            }

            prefix = cut.openers;
            if prefix.chars().count() >= max_length {
                warn!("dropping continuation markup longer than the limit");
                prefix.clear();
            }
            cursor = resume;
        }

        info!(
            "split {} bytes into {} chunks (max {} chars)",
            text.len(),
            chunks.len(),
            max_length
        );
        chunks
    }

    /// Split several documents, in parallel when the `parallel` feature is on
    pub fn split_texts(&self, texts: &[&str]) -> Vec<Vec<Chunk>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            texts.par_iter().map(|text| self.split(text)).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            texts.iter().map(|text| self.split(text)).collect()
        }
    }

    fn choose_cut(
        &self,
        window: &Window<'_>,
        scanner: &SpanScanner,
        start: usize,
        prefix: &str,
    ) -> Cut {
        let found = self
            .finders
            .iter()
            .find_map(|finder| finder.find(window).map(|b| (finder.name(), b)));
        if let Some((name, boundary)) = found {
            debug!("{} finder cut at byte {}", name, boundary.offset);
            return Cut::at_boundary(boundary, false);
        }

        match self.config.overflow {
            OverflowPolicy::HardCut => overflow::hard_cut(window),
            OverflowPolicy::Lookahead { .. } => {
                overflow::lookahead(window).unwrap_or_else(|| overflow::hard_cut(window))
            }
            OverflowPolicy::Reopen => overflow::reopen(window, scanner, start, prefix)
                .unwrap_or_else(|| overflow::hard_cut(window)),
        }
    }
}

fn make_chunk(
    prefix: &str,
    body: &str,
    closers: &str,
    start: usize,
    separator_len: usize,
    cut: CutKind,
    oversized: bool,
) -> Chunk {
    let text = overflow::compose(prefix, body, closers);
    Chunk {
        char_len: text.chars().count(),
        text,
        start,
        end: start + body.len(),
        separator_len,
        cut,
        oversized,
        continued: !prefix.is_empty(),
    }
}

/// Builder for [`Chunker`]
pub struct ChunkerBuilder {
    config: ChunkerConfig,
    finders: Option<Vec<Box<dyn BoundaryFinder>>>,
}

impl Default for ChunkerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkerBuilder {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ChunkerConfig::default(),
            finders: None,
        }
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: ChunkerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum chunk length in characters
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.config.max_length = max_length;
        self
    }

    /// Set the overflow policy
    pub fn overflow(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow = policy;
        self
    }

    /// Use the lookahead policy with the given extra budget
    pub fn lookahead(self, max_extra: usize) -> Self {
        self.overflow(OverflowPolicy::Lookahead { max_extra })
    }

    /// Use the reopen policy
    pub fn reopen(self) -> Self {
        self.overflow(OverflowPolicy::Reopen)
    }

    /// Enable or disable math span tracking
    pub fn math(mut self, enabled: bool) -> Self {
        self.config.markup.math = enabled;
        self
    }

    /// Replace the finder chain
    pub fn finders(mut self, finders: Vec<Box<dyn BoundaryFinder>>) -> Self {
        self.finders = Some(finders);
        self
    }

    /// Build the chunker
    pub fn build(self) -> Result<Chunker> {
        match self.finders {
            Some(finders) => Chunker::with_finders(self.config, finders),
            None => Chunker::new(self.config),
        }
    }
}
