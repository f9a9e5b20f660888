//! Formatting span tracking
//!
//! [`SpanScanner`] walks text left to right and keeps a stack of open spans.
//! Symmetric inline markers (`**`, `__`, `*`, `_`, `~~`, `||`) toggle, code
//! and math spans are opaque until their own closer shows up, and fenced code
//! blocks are recognised line by line.
//!
//! Open spans are never dropped: a marker without a closer keeps every later
//! position unbalanced, whatever blank lines or fences follow it.

/// Category of a formatting span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// `**bold**`
    Bold,
    /// `*italic*` or `_italic_`
    Italic,
    /// `__underline__`
    Underline,
    /// `~~strikethrough~~`
    Strikethrough,
    /// `||spoiler||`
    Spoiler,
    /// `` `inline code` ``
    InlineCode,
    /// Fenced code block
    FencedCode,
    /// `$inline math$`
    InlineMath,
    /// `$$display math$$` or `\[display math\]`
    DisplayMath,
}

/// Concrete token that opened a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `**`
    DoubleStar,
    /// `__`
    DoubleUnderscore,
    /// `*`
    Star,
    /// `_`
    Underscore,
    /// `~~`
    DoubleTilde,
    /// `||`
    DoublePipe,
    /// A run of backticks of the given length
    Backticks(usize),
    /// A code fence line
    Fence {
        /// Fence character (backtick or tilde)
        ch: char,
        /// Number of fence characters
        len: usize,
    },
    /// `$$`
    DoubleDollar,
    /// `$`
    Dollar,
    /// `\[`, closed by `\]`
    Bracket,
}

impl Delimiter {
    /// The span kind this delimiter produces
    pub fn kind(&self) -> SpanKind {
        match self {
            Delimiter::DoubleStar => SpanKind::Bold,
            Delimiter::DoubleUnderscore => SpanKind::Underline,
            Delimiter::Star | Delimiter::Underscore => SpanKind::Italic,
            Delimiter::DoubleTilde => SpanKind::Strikethrough,
            Delimiter::DoublePipe => SpanKind::Spoiler,
            Delimiter::Backticks(_) => SpanKind::InlineCode,
            Delimiter::Fence { .. } => SpanKind::FencedCode,
            Delimiter::Dollar => SpanKind::InlineMath,
            Delimiter::DoubleDollar | Delimiter::Bracket => SpanKind::DisplayMath,
        }
    }

    /// Whether the span content is opaque to other markers
    pub fn is_opaque(&self) -> bool {
        matches!(
            self,
            Delimiter::Backticks(_)
                | Delimiter::Fence { .. }
                | Delimiter::DoubleDollar
                | Delimiter::Dollar
                | Delimiter::Bracket
        )
    }

    /// Text that opens the span (a fence without its info string)
    pub fn open_token(&self) -> String {
        match self {
            Delimiter::DoubleStar => "**".to_string(),
            Delimiter::DoubleUnderscore => "__".to_string(),
            Delimiter::Star => "*".to_string(),
            Delimiter::Underscore => "_".to_string(),
            Delimiter::DoubleTilde => "~~".to_string(),
            Delimiter::DoublePipe => "||".to_string(),
            Delimiter::Backticks(len) => "`".repeat(*len),
            Delimiter::Fence { ch, len } => ch.to_string().repeat(*len),
            Delimiter::DoubleDollar => "$$".to_string(),
            Delimiter::Dollar => "$".to_string(),
            Delimiter::Bracket => "\\[".to_string(),
        }
    }

    /// Text that closes the span
    ///
    /// A fence closer starts with a newline so it lands on its own line.
    pub fn close_token(&self) -> String {
        match self {
            Delimiter::Fence { ch, len } => format!("\n{}", ch.to_string().repeat(*len)),
            Delimiter::Bracket => "\\]".to_string(),
            other => other.open_token(),
        }
    }
}

/// Which markup families the scanner recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupOptions {
    /// Track LaTeX math spans: `$...$`, `$$...$$` and `\[...\]`
    pub math: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self { math: true }
    }
}

/// Stack of currently open spans, outermost first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanState {
    open: Vec<Delimiter>,
    fence_info: String,
}

impl SpanState {
    /// True when no span is open
    pub fn is_balanced(&self) -> bool {
        self.open.is_empty()
    }

    /// Open spans in opening order
    pub fn open_spans(&self) -> &[Delimiter] {
        &self.open
    }

    /// The most recently opened span
    pub fn innermost(&self) -> Option<Delimiter> {
        self.open.last().copied()
    }

    /// Info string (usually the language) of the open code fence
    pub fn fence_info(&self) -> Option<&str> {
        self.open
            .iter()
            .any(|d| matches!(d, Delimiter::Fence { .. }))
            .then_some(self.fence_info.as_str())
    }

    /// Markup that re-opens every open span, outermost first
    pub fn openers(&self) -> String {
        let mut out = String::new();
        for delimiter in &self.open {
            out.push_str(&delimiter.open_token());
            if let Delimiter::Fence { .. } = delimiter {
                out.push_str(&self.fence_info);
                out.push('\n');
            }
        }
        out
    }

    /// Markup that closes every open span, innermost first
    pub fn closers(&self) -> String {
        self.open.iter().rev().map(Delimiter::close_token).collect()
    }

    fn contains(&self, delimiter: Delimiter) -> bool {
        self.open.contains(&delimiter)
    }

    fn push(&mut self, delimiter: Delimiter) {
        self.open.push(delimiter);
    }

    fn remove(&mut self, delimiter: Delimiter) {
        if let Some(index) = self.open.iter().rposition(|d| *d == delimiter) {
            self.open.remove(index);
        }
    }
}

/// Resumable left-to-right span tracker
///
/// The scanner can be fed a text in several [`advance`](Self::advance) calls
/// and cloned at any point, which lets callers probe the balance at many
/// candidate positions in a single pass.
#[derive(Debug, Clone)]
pub struct SpanScanner {
    options: MarkupOptions,
    state: SpanState,
    line_start: bool,
    prev: Option<char>,
}

impl Default for SpanScanner {
    fn default() -> Self {
        Self::new(MarkupOptions::default())
    }
}

impl SpanScanner {
    /// Create a scanner positioned at the start of a line
    pub fn new(options: MarkupOptions) -> Self {
        Self {
            options,
            state: SpanState::default(),
            line_start: true,
            prev: None,
        }
    }

    /// Markup options in effect
    pub fn options(&self) -> MarkupOptions {
        self.options
    }

    /// Current span state
    pub fn state(&self) -> &SpanState {
        &self.state
    }

    /// True when no span is open at the current position
    pub fn is_balanced(&self) -> bool {
        self.state.is_balanced()
    }

    /// Scan the whole of `text`
    pub fn feed(&mut self, text: &str) {
        self.advance(text, 0, text.len());
    }

    /// Scan `text` from byte `from` until at least byte `to`
    ///
    /// `text` past `to` is used as lookahead only. Returns the byte position
    /// reached, which can exceed `to` when a token (a fence line, a marker
    /// run) straddles it; pass that position back as `from` on the next call.
    pub fn advance(&mut self, text: &str, from: usize, to: usize) -> usize {
        let to = to.min(text.len());
        let mut pos = from;
        while pos < to {
            pos = match self.state.innermost() {
                Some(open) if open.is_opaque() => self.step_opaque(text, pos, open),
                _ => self.step(text, pos),
            };
        }
        pos
    }

    fn step(&mut self, text: &str, pos: usize) -> usize {
        let byte = text.as_bytes()[pos];
        match byte {
            b'`' | b'~' if self.line_start => match self.open_fence(text, pos) {
                Some(end) => end,
                None if byte == b'`' => self.code_span(text, pos),
                None => self.marker(text, pos),
            },
            b'`' => self.code_span(text, pos),
            b'\\' => self.escape(text, pos),
            b'$' if self.options.math => self.dollar(text, pos),
            b'*' | b'_' | b'~' | b'|' => self.marker(text, pos),
            _ => self.consume_char(text, pos),
        }
    }

    fn step_opaque(&mut self, text: &str, pos: usize, open: Delimiter) -> usize {
        let bytes = text.as_bytes();
        match (open, bytes[pos]) {
            (Delimiter::Fence { ch, len }, byte) if self.line_start && byte == ch as u8 => {
                let run = run_length(text, pos, byte);
                let end = line_end(text, pos);
                if run >= len && text[pos + run..end].trim().is_empty() {
                    self.state.remove(open);
                    self.state.fence_info.clear();
                    self.settle(text, end)
                } else {
                    self.settle(text, pos + run)
                }
            }
            (Delimiter::Backticks(len), b'`') => {
                let run = run_length(text, pos, b'`');
                if run == len {
                    self.state.remove(open);
                }
                self.settle(text, pos + run)
            }
            (Delimiter::DoubleDollar | Delimiter::Dollar | Delimiter::Bracket, b'\\') => {
                if open == Delimiter::Bracket && bytes.get(pos + 1) == Some(&b']') {
                    self.state.remove(open);
                    return self.settle(text, pos + 2);
                }
                let next = self.consume_char(text, pos);
                if next < text.len() {
                    self.consume_char(text, next)
                } else {
                    next
                }
            }
            (Delimiter::DoubleDollar, b'$') if bytes.get(pos + 1) == Some(&b'$') => {
                self.state.remove(open);
                self.settle(text, pos + 2)
            }
            (Delimiter::Dollar, b'$') if self.prev.is_some_and(|c| !c.is_whitespace()) => {
                self.state.remove(open);
                self.settle(text, pos + 1)
            }
            _ => self.consume_char(text, pos),
        }
    }

    fn open_fence(&mut self, text: &str, pos: usize) -> Option<usize> {
        let byte = text.as_bytes()[pos];
        let len = run_length(text, pos, byte);
        if len < 3 {
            return None;
        }
        let end = line_end(text, pos);
        let info = text[pos + len..end].trim();
        if byte == b'`' && info.contains('`') {
            return None;
        }
        self.state.push(Delimiter::Fence {
            ch: byte as char,
            len,
        });
        self.state.fence_info = info.to_string();
        Some(self.settle(text, end))
    }

    fn code_span(&mut self, text: &str, pos: usize) -> usize {
        let len = run_length(text, pos, b'`');
        self.state.push(Delimiter::Backticks(len));
        self.settle(text, pos + len)
    }

    fn escape(&mut self, text: &str, pos: usize) -> usize {
        match text[pos + 1..].chars().next() {
            Some('[') if self.options.math => {
                self.state.push(Delimiter::Bracket);
                self.settle(text, pos + 2)
            }
            Some(c) if c.is_ascii_punctuation() => self.settle(text, pos + 2),
            _ => self.consume_char(text, pos),
        }
    }

    fn dollar(&mut self, text: &str, pos: usize) -> usize {
        if text.as_bytes().get(pos + 1) == Some(&b'$') {
            self.state.push(Delimiter::DoubleDollar);
            return self.settle(text, pos + 2);
        }
        // `$5` is a price, not math
        match text[pos + 1..].chars().next() {
            Some(c) if !c.is_whitespace() && !c.is_ascii_digit() => {
                self.state.push(Delimiter::Dollar);
                self.settle(text, pos + 1)
            }
            _ => self.consume_char(text, pos),
        }
    }

    fn marker(&mut self, text: &str, pos: usize) -> usize {
        let byte = text.as_bytes()[pos];
        if self.line_start && matches!(byte, b'*' | b'_') && is_thematic_break(text, pos, byte) {
            let end = line_end(text, pos);
            return self.settle(text, end);
        }

        let run = run_length(text, pos, byte);
        let delimiter = match (byte, run >= 2) {
            (b'*', true) => Delimiter::DoubleStar,
            (b'*', false) => Delimiter::Star,
            (b'_', true) => Delimiter::DoubleUnderscore,
            (b'_', false) => Delimiter::Underscore,
            (b'~', true) => Delimiter::DoubleTilde,
            (b'|', true) => Delimiter::DoublePipe,
            _ => return self.consume_char(text, pos),
        };
        let width = run.min(2);

        let before = self.prev;
        let after = text[pos + width..].chars().next();
        let underscore = byte == b'_';
        let before_alnum = before.is_some_and(char::is_alphanumeric);
        let after_alnum = after.is_some_and(char::is_alphanumeric);
        let can_close = before.is_some_and(|c| !c.is_whitespace()) && !(underscore && after_alnum);
        let can_open = after.is_some_and(|c| !c.is_whitespace()) && !(underscore && before_alnum);

        if self.state.contains(delimiter) {
            if can_close {
                self.state.remove(delimiter);
            }
        } else if can_open {
            self.state.push(delimiter);
        }
        self.settle(text, pos + width)
    }

    fn consume_char(&mut self, text: &str, pos: usize) -> usize {
        let Some(ch) = text[pos..].chars().next() else {
            return text.len();
        };
        match ch {
            '\n' => self.line_start = true,
            ' ' | '\t' | '\r' => {}
            _ => self.line_start = false,
        }
        self.prev = Some(ch);
        pos + ch.len_utf8()
    }

    /// Record that a non-blank token ending at `end` was consumed
    fn settle(&mut self, text: &str, end: usize) -> usize {
        if let Some(last) = text[..end].chars().next_back() {
            self.prev = Some(last);
        }
        self.line_start = false;
        end
    }
}

/// Check whether `text` leaves no formatting span open
pub fn is_balanced(text: &str) -> bool {
    is_balanced_with(text, MarkupOptions::default())
}

/// [`is_balanced`] with explicit markup options
pub fn is_balanced_with(text: &str, options: MarkupOptions) -> bool {
    let mut scanner = SpanScanner::new(options);
    scanner.feed(text);
    scanner.is_balanced()
}

fn run_length(text: &str, pos: usize, byte: u8) -> usize {
    text.as_bytes()[pos..]
        .iter()
        .take_while(|&&b| b == byte)
        .count()
}

fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| pos + i)
}

fn is_thematic_break(text: &str, pos: usize, byte: u8) -> bool {
    let line = &text[pos..line_end(text, pos)];
    let marks = line.bytes().filter(|&b| b == byte).count();
    marks >= 3 && line.bytes().all(|b| b == byte || matches!(b, b' ' | b'\t' | b'\r'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_of(text: &str) -> SpanState {
        let mut scanner = SpanScanner::default();
        scanner.feed(text);
        scanner.state().clone()
    }

    #[test]
    fn test_plain_text_is_balanced() {
        assert!(is_balanced(""));
        assert!(is_balanced("Hello world"));
        assert!(is_balanced("Привет, мир! 👋"));
    }

    #[test]
    fn test_symmetric_markers_toggle() {
        assert!(is_balanced("**bold** and _italic_"));
        assert!(is_balanced("~~gone~~ and ||hidden||"));
        assert!(is_balanced("__underlined__ *emphasis*"));
        assert!(!is_balanced("**bold and"));
        assert!(!is_balanced("||spoiler starts"));
        assert!(!is_balanced("text ~~strike"));
    }

    #[test]
    fn test_open_kind_reported() {
        let state = state_of("**bold _nested");
        assert_eq!(
            state.open_spans(),
            &[Delimiter::DoubleStar, Delimiter::Underscore]
        );
        assert_eq!(state.innermost().map(|d| d.kind()), Some(SpanKind::Italic));
    }

    #[test]
    fn test_triple_star_opens_and_closes_both() {
        assert!(!is_balanced("***bold italic"));
        assert!(is_balanced("***bold italic***"));
    }

    #[test]
    fn test_non_flanking_markers_ignored() {
        assert!(is_balanced("2 * 3 = 6"));
        assert!(is_balanced("* item one\n* item two"));
        assert!(is_balanced("a || b"));
        assert!(is_balanced("snake_case_name and another_one"));
    }

    #[test]
    fn test_thematic_break_ignored() {
        assert!(is_balanced("above\n\n***\n\nbelow"));
        assert!(is_balanced("___"));
        assert!(is_balanced("* * *"));
    }

    #[test]
    fn test_escaped_markers_are_literal() {
        assert!(is_balanced("\\*not italic\\*"));
        assert!(is_balanced("5 \\* 3 and \\_x"));
    }

    #[test]
    fn test_inline_code_is_opaque() {
        assert!(is_balanced("`a ** b`"));
        assert!(is_balanced("`` a ` b ``"));
        assert!(!is_balanced("`unterminated **code"));

        let state = state_of("`code");
        assert_eq!(state.open_spans(), &[Delimiter::Backticks(1)]);
    }

    #[test]
    fn test_fenced_code_block() {
        assert!(is_balanced("```rust\nlet x = **y;\n```"));
        assert!(is_balanced("~~~\n~~ not strike\n~~~\nafter"));
        assert!(!is_balanced("```python\ndef f():\n    return 1"));
    }

    #[test]
    fn test_fence_content_does_not_toggle_markers() {
        // The `**` inside the fence must not pair with the one after it.
        assert!(!is_balanced("```\na ** b\n```\n**open"));
        assert!(is_balanced("```\n_x_ `y\n```\n**bold**"));
    }

    #[test]
    fn test_fence_requires_matching_closer() {
        // A shorter run does not close a longer fence.
        assert!(!is_balanced("````\ncode\n```\nstill code"));
        assert!(is_balanced("````\ncode\n```\n````"));
        // Text after the run means it is not a closing fence.
        assert!(!is_balanced("```\ncode\n``` not a close"));
    }

    #[test]
    fn test_inline_triple_backticks_are_code_span() {
        assert!(is_balanced("```inline``` text"));
        assert!(is_balanced("see ```x``` here"));
    }

    #[test]
    fn test_fence_info_and_continuation_markers() {
        let state = state_of("intro\n```python\nprint(1)");
        assert_eq!(state.fence_info(), Some("python"));
        assert_eq!(state.openers(), "```python\n");
        assert_eq!(state.closers(), "\n```");
    }

    #[test]
    fn test_closers_are_innermost_first() {
        let state = state_of("**bold ~~strike");
        assert_eq!(state.closers(), "~~**");
        assert_eq!(state.openers(), "**~~");
        assert_eq!(state.fence_info(), None);
    }

    #[test]
    fn test_math_spans() {
        assert!(is_balanced("$x^2$ costs $5"));
        assert!(is_balanced("$$\n\\sum_{i=1}^{n} i\n$$"));
        assert!(is_balanced("\\[ a + b \\]"));
        assert!(!is_balanced("$$ \\int_0^1"));
        assert!(!is_balanced("\\[ a +"));
        assert!(!is_balanced("inline $x + y"));
    }

    #[test]
    fn test_math_content_is_opaque() {
        assert!(is_balanced("$a_1 * b_2$"));
        assert!(is_balanced("$$a ** b$$"));
    }

    #[test]
    fn test_math_can_be_disabled() {
        let options = MarkupOptions { math: false };
        assert!(is_balanced_with("inline $x + y", options));
        assert!(is_balanced_with("$$ \\int", options));
        assert!(!is_balanced_with("**bold", options));
    }

    #[test]
    fn test_blank_line_keeps_inline_spans_open() {
        assert!(!is_balanced("*stray"));
        assert!(!is_balanced("*stray\n\nnext"));
        assert!(!is_balanced("`stray\n\nnext paragraph"));
        assert!(!is_balanced("**bold start\n\nmore words here"));
        assert_eq!(
            state_of("||a\n\n\nb").open_spans(),
            &[Delimiter::DoublePipe]
        );
    }

    #[test]
    fn test_marker_closes_in_a_later_paragraph() {
        assert!(is_balanced("**bold\n\nstill bold**"));
        assert!(is_balanced("*a\n\nb* and `c\n\nd`"));
    }

    #[test]
    fn test_blank_line_keeps_block_spans() {
        assert!(!is_balanced("```\ncode\n\nmore code"));
        assert!(!is_balanced("$$\na\n\nb"));
    }

    #[test]
    fn test_fence_does_not_drop_open_inline_span() {
        let state = state_of("**open\n```\ncode");
        assert_eq!(
            state.open_spans(),
            &[Delimiter::DoubleStar, Delimiter::Fence { ch: '`', len: 3 }]
        );
        assert!(!is_balanced("**open\n```\ncode\n```\nafter"));
        assert!(is_balanced("**open\n```\ncode\n```\nafter**"));
    }

    #[test]
    fn test_advance_resumes_across_calls() {
        let text = "**bold** then ```\ncode\n```";
        let mut whole = SpanScanner::default();
        whole.feed(text);

        let mut split = SpanScanner::default();
        let pos = split.advance(text, 0, 5);
        let pos = split.advance(text, pos, 14);
        split.advance(text, pos, text.len());

        assert_eq!(whole.state(), split.state());
        assert!(split.is_balanced());
    }

    #[test]
    fn test_advance_reports_straddling_token() {
        let text = "```rust title\ncode";
        let mut scanner = SpanScanner::default();
        // Position 7 is inside the fence line; the whole line is consumed.
        let pos = scanner.advance(text, 0, 7);
        assert_eq!(pos, 13);
        assert_eq!(scanner.state().fence_info(), Some("rust title"));
    }
}
