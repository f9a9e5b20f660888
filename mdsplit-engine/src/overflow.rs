//! Fallback cuts used when no balanced boundary fits
//!
//! The chunker asks the boundary finders first. When they come back empty,
//! the configured [`OverflowPolicy`](crate::OverflowPolicy) decides between a
//! hard cut at the limit, a longer chunk ending at the next balanced boundary,
//! or a cut that closes the open spans and re-opens them in the next chunk.

use crate::chunker::CutKind;
use mdsplit_core::{
    is_balanced_with, Boundary, BoundaryKind, Delimiter, MarkupOptions, SpanKind, SpanScanner,
    SpanState, Window,
};

/// Where and how the current chunk ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cut {
    /// Byte offset (relative to the window) where the source slice ends
    pub end: usize,
    /// Whitespace bytes skipped after `end`
    pub separator_len: usize,
    /// How the cut was chosen
    pub kind: CutKind,
    /// Chunk is allowed past the limit
    pub oversized: bool,
    /// Markup appended to close spans left open at `end`
    pub closers: String,
    /// Markup that re-opens those spans at the start of the next chunk
    pub openers: String,
}

impl Cut {
    pub fn at_boundary(boundary: Boundary, oversized: bool) -> Self {
        Self {
            end: boundary.offset,
            separator_len: boundary.separator_len,
            kind: boundary.kind.into(),
            oversized,
            closers: String::new(),
            openers: String::new(),
        }
    }

    fn raw(end: usize) -> Self {
        Self {
            end,
            separator_len: 0,
            kind: CutKind::Hard,
            oversized: false,
            closers: String::new(),
            openers: String::new(),
        }
    }

    fn new(end: usize, boundary: Option<Boundary>) -> Self {
        match boundary {
            Some(boundary) => Self::at_boundary(boundary, false),
            None => Self::raw(end),
        }
    }
}

/// Chunk text: re-opened markup, source slice, closing markup
///
/// Inline openers go after the leading blanks of `body` so they still touch
/// the first word.
pub(crate) fn compose(prefix: &str, body: &str, closers: &str) -> String {
    let (indent, body) = body.split_at(indent_len(prefix, body));
    format!("{indent}{prefix}{body}{closers}")
}

fn indent_len(prefix: &str, body: &str) -> usize {
    if prefix.ends_with(['*', '_', '~', '|']) {
        body.len() - body.trim_start_matches([' ', '\t']).len()
    } else {
        0
    }
}

/// Cut exactly at the limit
pub(crate) fn hard_cut(window: &Window<'_>) -> Cut {
    Cut::raw(window.limit_offset())
}

/// End the chunk at the first balanced boundary past the limit
pub(crate) fn lookahead(window: &Window<'_>) -> Option<Cut> {
    window
        .first_balanced_beyond_limit()
        .map(|boundary| Cut::at_boundary(boundary, true))
}

/// Cut inside the open spans, closing and re-opening them
///
/// `scanner` holds the span state at byte `start` of the window text and
/// `prefix` is the markup the chunk starts with. Every accepted cut yields a
/// chunk that is balanced on its own and openers that restore the exact span
/// state in the next chunk. Returns `None` when no such cut fits, in which
/// case the caller falls back to a hard cut.
pub(crate) fn reopen(
    window: &Window<'_>,
    scanner: &SpanScanner,
    start: usize,
    prefix: &str,
) -> Option<Cut> {
    let text = window.text();
    let options = scanner.options();
    let limit = window.limit();
    let mut target = limit;
    while target > 0 {
        let (mut end, mut boundary) = pick_cut(window, target);
        let Some(mut state) = state_at(window, scanner, start, end) else {
            // The cut landed inside a multi-byte token such as a fence line.
            target -= 1;
            continue;
        };
        if in_display_math(&state) && !is_upper_line(boundary, target) {
            let operator = operator_cut(text, target).and_then(|op| {
                state_at(window, scanner, start, op)
                    .filter(in_display_math)
                    .map(|found| (op, found))
            });
            if let Some((op, op_state)) = operator {
                end = op;
                boundary = None;
                state = op_state;
            }
        }

        let body = char_len(&text[..end]);
        let mut cut = Cut::new(end, boundary);
        if !state.is_balanced() {
            let closers = state.closers();
            let total = body + char_len(&closers);
            if total > limit {
                target = target.min(body).saturating_sub(total - limit);
                continue;
            }
            if !reopens(&state, &text[end + cut.separator_len..], options) {
                target = target.min(body).saturating_sub(1);
                continue;
            }
            cut.openers = state.openers();
            cut.closers = closers;
        }

        if is_balanced_with(&compose(prefix, &text[..end], &cut.closers), options) {
            return Some(cut);
        }
        target = target.min(body).saturating_sub(1);
    }
    None
}

/// Closing markup for the last chunk, or `None` when it does not fit
///
/// `scanner` holds the span state at byte `from` of the whole `text`; `body`
/// is the unprocessed suffix.
pub(crate) fn final_closers(
    scanner: &SpanScanner,
    text: &str,
    from: usize,
    prefix: &str,
    body: &str,
    budget: usize,
) -> Option<String> {
    let mut probe = scanner.clone();
    probe.advance(text, from, text.len());
    let closers = probe.state().closers();
    if closers.is_empty() {
        return Some(closers);
    }
    let fits = char_len(body) + char_len(&closers) <= budget;
    (fits && is_balanced_with(&compose(prefix, body, &closers), scanner.options()))
        .then_some(closers)
}

/// Prefer a line break in the upper half of the budget, then any whitespace,
/// then a raw cut
fn pick_cut(window: &Window<'_>, target: usize) -> (usize, Option<Boundary>) {
    let fitting = || {
        window
            .candidates()
            .iter()
            .rev()
            .filter(move |b| b.char_offset <= target && b.kind != BoundaryKind::End)
    };

    let line = fitting().find(|b| is_upper_line(Some(**b), target));
    match line.or_else(|| fitting().next()) {
        Some(boundary) => (boundary.offset, Some(*boundary)),
        None => (raw_cut(window.text(), target), None),
    }
}

fn is_upper_line(boundary: Option<Boundary>, target: usize) -> bool {
    boundary.is_some_and(|b| b.kind >= BoundaryKind::Line && b.char_offset >= target / 2)
}

fn in_display_math(state: &SpanState) -> bool {
    state
        .innermost()
        .is_some_and(|open| open.kind() == SpanKind::DisplayMath)
}

/// Byte offset just past the last `+`, `-`, `=` or `\\` in the upper half
/// of `target` characters
fn operator_cut(text: &str, target: usize) -> Option<usize> {
    let mut found = None;
    let mut prev = None;
    for (idx, (byte, ch)) in text.char_indices().take(target).enumerate() {
        let operator = matches!(ch, '+' | '-' | '=') || (ch == '\\' && prev == Some('\\'));
        if operator && idx + 1 >= target / 2 {
            found = Some(byte + ch.len_utf8());
        }
        prev = Some(ch);
    }
    found
}

/// Byte offset of char `target`, moved left off a run of marker characters
fn raw_cut(text: &str, target: usize) -> usize {
    let end = text
        .char_indices()
        .nth(target)
        .map_or(text.len(), |(byte, _)| byte);

    let bytes = text.as_bytes();
    let mut adjusted = end;
    while adjusted > 0 && is_marker_byte(bytes[adjusted - 1]) {
        adjusted -= 1;
    }
    if adjusted == 0 {
        end
    } else {
        adjusted
    }
}

fn is_marker_byte(byte: u8) -> bool {
    matches!(byte, b'*' | b'_' | b'~' | b'|' | b'`' | b'$' | b'\\')
}

/// Whether the openers of `state`, placed before `next`, restore it exactly
///
/// A marker right after the openers would be read against a different
/// neighbour than in the source, so that position is refused.
fn reopens(state: &SpanState, next: &str, options: MarkupOptions) -> bool {
    let line = &next[..next.find('\n').map_or(next.len(), |i| i + 1)];
    if line.is_empty() {
        return true;
    }

    let openers = state.openers();
    if let Some(first) = line.trim_start_matches([' ', '\t']).chars().next() {
        let clash = match state.innermost() {
            Some(Delimiter::Fence { ch, .. }) => first == ch,
            Some(Delimiter::Dollar) => first == '$',
            Some(open) if open.is_opaque() => false,
            _ => first.is_ascii() && is_marker_byte(first as u8),
        };
        if clash {
            return false;
        }
    }

    let probe_text = compose(&openers, line, "");
    let end = indent_len(&openers, line) + openers.len();
    let mut probe = SpanScanner::new(options);
    probe.advance(&probe_text, 0, end) == end && probe.state().openers() == openers
}

/// Span state at `offset`, or `None` if a token straddles it
fn state_at(
    window: &Window<'_>,
    scanner: &SpanScanner,
    start: usize,
    offset: usize,
) -> Option<SpanState> {
    let mut probe = scanner.clone();
    let reached = probe.advance(window.text(), start, offset);
    (reached == offset).then(|| probe.state().clone())
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
