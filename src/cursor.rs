//! Cursor seam between the parsing engine and the scanning routines.
//!
//! The host parser owns the real cursor; a scanning routine borrows it for
//! the duration of one call through the [`Cursor`] trait. [`SourceCursor`]
//! is a string-backed implementation used by this crate's tests, benchmarks
//! and tooling, and by embedders that drive the scanner directly.

use std::iter::Peekable;
use std::str::CharIndices;

use serde::Serialize;

use crate::scanner::TokenKind;

/// Source span of a committed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 1,
            column: 1,
        }
    }
}

/// One-call view of the host lexer cursor.
///
/// A routine may probe `lookahead` freely, but a consumed character cannot
/// be un-consumed: decisions that would require retraction must be made
/// before calling `advance` or `skip`. A routine commits a token boundary
/// with `mark_end` before reporting success; failure paths leave whatever
/// partial progress happened for the host to discard.
pub trait Cursor {
    /// Current lookahead character, `None` at end of input.
    fn lookahead(&mut self) -> Option<char>;

    /// Consume the lookahead into the token (included consumption).
    fn advance(&mut self);

    /// Consume the lookahead as separator material (excluded consumption).
    fn skip(&mut self);

    /// Commit the tentative token end boundary at the current position.
    fn mark_end(&mut self);

    /// Record the recognized token kind in the cursor's output slot.
    fn set_token_kind(&mut self, kind: TokenKind);
}

/// Cursor state snapshot for backtracking.
#[derive(Clone)]
pub struct CursorCheckpoint {
    pos: usize,
    line: u32,
    column: u32,
    token_start: usize,
    token_line: u32,
    token_column: u32,
    marked_end: Option<usize>,
    token_kind: Option<TokenKind>,
}

/// String-backed [`Cursor`] over a borrowed source slice.
///
/// Tracks byte offsets plus 1-based line/column across the ECMAScript line
/// terminators (LF, LS U+2028, PS U+2029). `skip` moves the pending token
/// start forward so that the committed span covers included characters only.
pub struct SourceCursor<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    /// Base offset added to char_indices positions (needed when resetting
    /// chars from the middle of the source)
    chars_base_offset: usize,
    pos: usize,
    line: u32,
    column: u32,
    token_start: usize,
    token_line: u32,
    token_column: u32,
    marked_end: Option<usize>,
    token_kind: Option<TokenKind>,
}

impl<'a> SourceCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            chars_base_offset: 0,
            pos: 0,
            line: 1,
            column: 1,
            token_start: 0,
            token_line: 1,
            token_column: 1,
            marked_end: None,
            token_kind: None,
        }
    }

    /// Current byte offset into the source.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Kind recorded by the last successful scan, if any.
    pub fn token_kind(&self) -> Option<TokenKind> {
        self.token_kind
    }

    /// Committed span of the last recognized token.
    ///
    /// `None` until a routine has called `mark_end`.
    pub fn token_span(&self) -> Option<Span> {
        let end = self.marked_end?;
        Some(Span::new(
            self.token_start,
            end,
            self.token_line,
            self.token_column,
        ))
    }

    /// Source text covered by the committed span.
    pub fn token_text(&self) -> Option<&'a str> {
        let end = self.marked_end?;
        self.source.get(self.token_start..end)
    }

    /// Create a checkpoint of the current cursor state for backtracking.
    pub fn checkpoint(&self) -> CursorCheckpoint {
        CursorCheckpoint {
            pos: self.pos,
            line: self.line,
            column: self.column,
            token_start: self.token_start,
            token_line: self.token_line,
            token_column: self.token_column,
            marked_end: self.marked_end,
            token_kind: self.token_kind,
        }
    }

    /// Restore the cursor state from a checkpoint.
    ///
    /// The host calls this after a declined scan to discard partial
    /// progress before trying the next grammar alternative.
    pub fn restore(&mut self, checkpoint: CursorCheckpoint) {
        self.pos = checkpoint.pos;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
        self.token_start = checkpoint.token_start;
        self.token_line = checkpoint.token_line;
        self.token_column = checkpoint.token_column;
        self.marked_end = checkpoint.marked_end;
        self.token_kind = checkpoint.token_kind;
        // Re-seed the iterator directly from the checkpoint position (O(1)
        // instead of O(n)); the base offset tracks where in the source the
        // iterator now starts.
        self.chars_base_offset = checkpoint.pos;
        self.chars = self
            .source
            .get(checkpoint.pos..)
            .unwrap_or("")
            .char_indices()
            .peekable();
    }

    fn consume(&mut self) -> Option<char> {
        let (pos, ch) = self.chars.next()?;
        self.pos = self.chars_base_offset + pos + ch.len_utf8();
        // ECMAScript line terminators: LF, LS (U+2028), PS (U+2029)
        if ch == '\n' || ch == '\u{2028}' || ch == '\u{2029}' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }
}

impl Cursor for SourceCursor<'_> {
    fn lookahead(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn advance(&mut self) {
        self.consume();
    }

    fn skip(&mut self) {
        if self.consume().is_some() {
            self.token_start = self.pos;
            self.token_line = self.line;
            self.token_column = self.column;
        }
    }

    fn mark_end(&mut self) {
        self.marked_end = Some(self.pos);
    }

    fn set_token_kind(&mut self, kind: TokenKind) {
        self.token_kind = Some(kind);
    }
}
