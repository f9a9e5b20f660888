//! Candidate cut positions and the strategies that choose among them
//!
//! A [`Window`] is built over the unprocessed suffix of a document. It holds
//! every whitespace run that starts inside the length budget (plus an optional
//! lookahead), classified by how many newlines the run contains and tagged
//! with whether the formatting spans are balanced at that point.
//! [`BoundaryFinder`] implementations then pick the best candidate.

use crate::span::SpanScanner;

/// Strength of a cut position, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BoundaryKind {
    /// Whitespace run without a newline
    Word,
    /// Whitespace run with exactly one newline
    Line,
    /// Whitespace run with a blank line in it
    Paragraph,
    /// End of the text
    End,
}

/// A candidate cut position inside a [`Window`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    /// Kind of whitespace run the cut sits on
    pub kind: BoundaryKind,
    /// Byte offset where the chunk ends (start of the whitespace run)
    pub offset: usize,
    /// Same position counted in characters
    pub char_offset: usize,
    /// Bytes of whitespace consumed after `offset` and dropped from output
    pub separator_len: usize,
    /// Whether cutting here leaves no formatting span open
    pub balanced: bool,
}

impl Boundary {
    /// Byte offset where the next chunk starts
    pub fn resume_offset(&self) -> usize {
        self.offset + self.separator_len
    }
}

/// Length-bounded view over a text with its candidate boundaries
#[derive(Debug, Clone)]
pub struct Window<'a> {
    text: &'a str,
    limit: usize,
    limit_offset: usize,
    candidates: Vec<Boundary>,
    complete: bool,
}

impl<'a> Window<'a> {
    /// Build a window over `text` starting from a fresh span state
    pub fn new(text: &'a str, limit: usize) -> Self {
        Self::scan(text, limit, 0, &SpanScanner::default(), 0)
    }

    /// Build a window in a single forward pass
    ///
    /// `scanner` holds the span state in effect at byte `start` of `text`
    /// (which is non-zero when a previous scan ran past the start of this
    /// window). Candidates before `start` are reported unbalanced since their
    /// state is unknown. Candidates are collected up to `limit + lookahead`
    /// characters.
    pub fn scan(
        text: &'a str,
        limit: usize,
        lookahead: usize,
        scanner: &SpanScanner,
        start: usize,
    ) -> Self {
        let extent = limit.saturating_add(lookahead);
        let mut scanner = scanner.clone();
        let mut pos = start;
        let mut candidates = Vec::new();
        let mut limit_offset = text.len();
        let mut complete = true;
        let mut in_run = false;
        let mut char_idx = 0;

        for (byte, ch) in text.char_indices() {
            if char_idx == limit {
                limit_offset = byte;
            }
            if char_idx > extent {
                complete = false;
                break;
            }

            if is_break_whitespace(ch) {
                if !in_run && byte > 0 {
                    let (kind, separator_len) = classify_run(&text[byte..]);
                    pos = scanner.advance(text, pos, byte);
                    candidates.push(Boundary {
                        kind,
                        offset: byte,
                        char_offset: char_idx,
                        separator_len,
                        balanced: pos <= byte && scanner.is_balanced(),
                    });
                }
                in_run = true;
            } else {
                in_run = false;
            }
            char_idx += 1;
        }

        if complete && !text.is_empty() {
            scanner.advance(text, pos, text.len());
            candidates.push(Boundary {
                kind: BoundaryKind::End,
                offset: text.len(),
                char_offset: char_idx,
                separator_len: 0,
                balanced: scanner.is_balanced(),
            });
        }

        Self {
            text,
            limit,
            limit_offset,
            candidates,
            complete,
        }
    }

    /// The text this window covers
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Budget in characters
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Byte offset of the character at index `limit` (text length if shorter)
    pub fn limit_offset(&self) -> usize {
        self.limit_offset
    }

    /// All candidates in text order
    pub fn candidates(&self) -> &[Boundary] {
        &self.candidates
    }

    /// Whether the scan reached the end of the text
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Rightmost balanced candidate within the limit that satisfies `accept`
    pub fn last_balanced<F>(&self, accept: F) -> Option<Boundary>
    where
        F: Fn(&Boundary) -> bool,
    {
        self.candidates
            .iter()
            .rev()
            .filter(|b| b.char_offset <= self.limit)
            .find(|b| b.balanced && accept(b))
            .copied()
    }

    /// First balanced candidate past the limit, including the end of text
    pub fn first_balanced_beyond_limit(&self) -> Option<Boundary> {
        self.candidates
            .iter()
            .find(|b| b.char_offset > self.limit && b.balanced)
            .copied()
    }
}

/// Strategy for picking a cut position from a [`Window`]
pub trait BoundaryFinder: Send + Sync {
    /// Pick a boundary, or `None` if this strategy has no usable candidate
    fn find(&self, window: &Window<'_>) -> Option<Boundary>;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}

/// Cuts at the last blank line
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphFinder;

impl BoundaryFinder for ParagraphFinder {
    fn find(&self, window: &Window<'_>) -> Option<Boundary> {
        window.last_balanced(|b| b.kind == BoundaryKind::Paragraph)
    }

    fn name(&self) -> &'static str {
        "paragraph"
    }
}

/// Cuts at the last line break
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFinder;

impl BoundaryFinder for LineFinder {
    fn find(&self, window: &Window<'_>) -> Option<Boundary> {
        window.last_balanced(|b| matches!(b.kind, BoundaryKind::Line | BoundaryKind::Paragraph))
    }

    fn name(&self) -> &'static str {
        "line"
    }
}

/// Cuts at the last whitespace
#[derive(Debug, Clone, Copy, Default)]
pub struct WordFinder;

impl BoundaryFinder for WordFinder {
    fn find(&self, window: &Window<'_>) -> Option<Boundary> {
        window.last_balanced(|b| b.kind != BoundaryKind::End)
    }

    fn name(&self) -> &'static str {
        "word"
    }
}

/// Paragraph, line and word finders in priority order
pub fn default_finders() -> Vec<Box<dyn BoundaryFinder>> {
    vec![
        Box::new(ParagraphFinder),
        Box::new(LineFinder),
        Box::new(WordFinder),
    ]
}

/// Find the best balanced boundary within `limit` characters of `text`
pub fn find_boundary(text: &str, limit: usize) -> Option<Boundary> {
    let window = Window::new(text, limit);
    default_finders()
        .iter()
        .find_map(|finder| finder.find(&window))
}

/// Whitespace that may be cut at; non-breaking spaces glue words together
fn is_break_whitespace(ch: char) -> bool {
    ch.is_whitespace() && !matches!(ch, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

/// Classify the whitespace run at the start of `run`
///
/// Returns the kind and the separator length in bytes. Line and paragraph
/// separators stop after the last newline so indentation stays with the
/// following line.
fn classify_run(run: &str) -> (BoundaryKind, usize) {
    let mut newlines = 0;
    let mut after_newline = 0;
    let mut len = 0;
    for (byte, ch) in run.char_indices() {
        if !is_break_whitespace(ch) {
            break;
        }
        len = byte + ch.len_utf8();
        if ch == '\n' {
            newlines += 1;
            after_newline = len;
        }
    }
    match newlines {
        0 => (BoundaryKind::Word, len),
        1 => (BoundaryKind::Line, after_newline),
        _ => (BoundaryKind::Paragraph, after_newline),
    }
}
