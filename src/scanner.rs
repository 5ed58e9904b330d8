//! Scanning routines for the grammar's context-sensitive tokens.
//!
//! The parser calls [`scan`] at positions where the next token cannot be
//! decided from context-free rules alone, passing the set of token kinds its
//! current state admits. Exactly one recognizer runs; on success it has
//! already recorded the token kind and committed the end boundary through
//! the cursor. [`scan_whitespace_and_comments`] is invoked separately by
//! the statement-termination rule to classify inter-token gaps.

use serde::Serialize;
use tracing::trace;

use crate::cursor::Cursor;

/// Token kinds resolved by the external scanner.
///
/// Ordinals are part of the contract with the grammar's token registry and
/// must not be reordered. `LogicalOr`, `EscapeSequence` and `RegexPattern`
/// are never produced here; they only participate in the [`scan`] guard for
/// `HtmlComment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum TokenKind {
    /// Raw text inside a template literal, up to `` ` ``, `${` or `\`.
    TemplateContent = 0,
    /// The `?` of a conditional expression (possibly spanning `?.`).
    TernaryQuestion = 1,
    /// SGML-style `<!--` or `-->` comment running to end of line.
    HtmlComment = 2,
    /// `||` - guard-only, recognized by the grammar itself.
    LogicalOr = 3,
    /// String/template escape sequence - guard-only.
    EscapeSequence = 4,
    /// Regular-expression literal body - guard-only.
    RegexPattern = 5,
}

impl TokenKind {
    /// Number of declared token kinds.
    pub const COUNT: usize = 6;

    /// Position of this kind in the grammar's token registry.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(TokenKind::TemplateContent),
            1 => Some(TokenKind::TernaryQuestion),
            2 => Some(TokenKind::HtmlComment),
            3 => Some(TokenKind::LogicalOr),
            4 => Some(TokenKind::EscapeSequence),
            5 => Some(TokenKind::RegexPattern),
            _ => None,
        }
    }
}

bitflags::bitflags! {
    /// The set of token kinds the grammar admits at the current position.
    ///
    /// Supplied fresh by the host on every [`scan`] call and never mutated
    /// by the scanner. Bit positions follow [`TokenKind`] ordinals.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TokenSet: u8 {
        const TEMPLATE_CONTENT = 1 << 0;
        const TERNARY_QUESTION = 1 << 1;
        const HTML_COMMENT = 1 << 2;
        const LOGICAL_OR = 1 << 3;
        const ESCAPE_SEQUENCE = 1 << 4;
        const REGEX_PATTERN = 1 << 5;
    }
}

impl TokenSet {
    /// Whether `kind` is admissible in this set.
    pub fn admits(self, kind: TokenKind) -> bool {
        self.bits() & (1 << kind.ordinal()) != 0
    }

    /// Build a set from the host's positional boolean array, indexed by
    /// token-kind ordinal. Entries past [`TokenKind::COUNT`] are ignored.
    pub fn from_flags(flags: &[bool]) -> Self {
        let mut set = TokenSet::empty();
        for (ordinal, &admissible) in flags.iter().take(TokenKind::COUNT).enumerate() {
            if admissible {
                set |= TokenSet::from_bits_truncate(1 << ordinal);
            }
        }
        set
    }
}

impl From<TokenKind> for TokenSet {
    fn from(kind: TokenKind) -> Self {
        TokenSet::from_bits_truncate(1 << kind.ordinal())
    }
}

/// Classification of an inter-token gap with respect to automatic
/// statement termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GapOutcome {
    /// A `/` opened neither `//` nor `/*`; a lexical error sits at this
    /// position and no terminator may be inserted.
    Reject,
    /// Everything consumed so far was terminator-free; the caller should
    /// keep scanning before committing.
    NoNewline,
    /// A terminator may be inserted ahead of the next token.
    Accept,
}

/// Result of [`scan_whitespace_and_comments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapScan {
    pub outcome: GapOutcome,
    /// Whether at least one complete comment was consumed.
    pub saw_comment: bool,
}

/// ECMAScript LineTerminator: LF, LS (U+2028), PS (U+2029).
fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\u{2028}' | '\u{2029}')
}

/// ECMAScript WhiteSpace characters (space, tab, VT, FF, NBSP, BOM, CR)
/// together with the line terminators above.
fn is_space(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\r' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}'
    ) || is_line_terminator(ch)
}

/// Attempt to recognize one context-sensitive token at the cursor position.
///
/// Recognizers run in fixed priority order: template content, then the
/// ternary `?`, then the legacy comment form. Returns `false` without
/// consuming input when nothing dispatchable is admissible; on `true` the
/// cursor carries the recognized kind and committed end boundary.
pub fn scan(cursor: &mut impl Cursor, valid: TokenSet) -> bool {
    trace!(?valid, "external scan");

    if valid.admits(TokenKind::TemplateContent) {
        return scan_template_content(cursor);
    }

    if valid.admits(TokenKind::TernaryQuestion) {
        return scan_ternary_question(cursor);
    }

    // `<!--` and `-->` read as operator/escape/pattern material whenever one
    // of those contexts is admissible, so the comment form only runs alone.
    if valid.admits(TokenKind::HtmlComment)
        && !valid.admits(TokenKind::LogicalOr)
        && !valid.admits(TokenKind::EscapeSequence)
        && !valid.admits(TokenKind::RegexPattern)
    {
        return scan_html_comment(cursor);
    }

    false
}

/// Consume raw template-literal text up to the closing backtick, a `${`
/// interpolation introducer, a backslash, or end of input.
///
/// A zero-length span is a failure: the grammar uses the delimiter tokens
/// instead. Escape handling belongs to a different grammar rule, so the
/// routine stops in front of any backslash.
fn scan_template_content(cursor: &mut impl Cursor) -> bool {
    cursor.set_token_kind(TokenKind::TemplateContent);
    let mut has_content = false;
    loop {
        cursor.mark_end();
        match cursor.lookahead() {
            None | Some('`') | Some('\\') => return has_content,
            Some('$') => {
                cursor.advance();
                if cursor.lookahead() == Some('{') {
                    // Boundary was marked before the `$`.
                    return has_content;
                }
                has_content = true;
            }
            Some(_) => {
                cursor.advance();
                has_content = true;
            }
        }
    }
}

/// Consume whitespace and comments between tokens (all excluded) and
/// classify whether a statement terminator may legally be inserted.
///
/// With `consume` false the routine only reads far enough to classify: it
/// returns right after a block comment whose closer is not followed by `/`,
/// reporting [`GapOutcome::Accept`] when the block contained a line
/// terminator and [`GapOutcome::NoNewline`] otherwise. Line comments always
/// run to the end of the line and imply a terminator.
pub fn scan_whitespace_and_comments(cursor: &mut impl Cursor, consume: bool) -> GapScan {
    let mut saw_comment = false;
    let mut saw_block_newline = false;

    loop {
        while matches!(cursor.lookahead(), Some(ch) if is_space(ch)) {
            cursor.skip();
        }

        if cursor.lookahead() != Some('/') {
            return GapScan {
                outcome: GapOutcome::Accept,
                saw_comment,
            };
        }
        cursor.skip();

        match cursor.lookahead() {
            Some('/') => {
                cursor.skip();
                while matches!(cursor.lookahead(), Some(ch) if !is_line_terminator(ch)) {
                    cursor.skip();
                }
                saw_comment = true;
            }
            Some('*') => {
                cursor.skip();
                while let Some(ch) = cursor.lookahead() {
                    if ch == '*' {
                        cursor.skip();
                        if cursor.lookahead() == Some('/') {
                            cursor.skip();
                            saw_comment = true;

                            if cursor.lookahead() != Some('/') && !consume {
                                let outcome = if saw_block_newline {
                                    GapOutcome::Accept
                                } else {
                                    GapOutcome::NoNewline
                                };
                                return GapScan {
                                    outcome,
                                    saw_comment,
                                };
                            }

                            break;
                        }
                    } else {
                        if is_line_terminator(ch) {
                            saw_block_newline = true;
                        }
                        cursor.skip();
                    }
                }
            }
            _ => {
                trace!("malformed comment opener");
                return GapScan {
                    outcome: GapOutcome::Reject,
                    saw_comment,
                };
            }
        }
    }
}

/// Disambiguate a `?` after optional whitespace.
///
/// `??` belongs to the grammar's nullish-coalescing token, so it is
/// declined. A lone `?` commits as [`TokenKind::TernaryQuestion`]; a
/// following `.` is folded into the span unless the character after it is a
/// digit, in which case the whole attempt is declined so that `?.5` parses
/// as a ternary followed by a fractional literal. The `.` is never
/// committed on that path: the marked boundary stays after the `?`.
fn scan_ternary_question(cursor: &mut impl Cursor) -> bool {
    while matches!(cursor.lookahead(), Some(ch) if is_space(ch)) {
        cursor.skip();
    }

    if cursor.lookahead() != Some('?') {
        return false;
    }
    cursor.advance();

    if cursor.lookahead() == Some('?') {
        // Nullish coalescing.
        return false;
    }

    cursor.mark_end();
    cursor.set_token_kind(TokenKind::TernaryQuestion);

    if cursor.lookahead() == Some('.') {
        cursor.advance();
        if matches!(cursor.lookahead(), Some(ch) if ch.is_ascii_digit()) {
            return false;
        }
        cursor.mark_end();
        return true;
    }
    true
}

/// Recognize `<!--` or `-->` plus the rest of the line as a single comment
/// token.
///
/// The marker is matched character by character; a mismatch declines with
/// whatever partial advancement already happened, which the host treats as
/// an unrecoverable attempt for this alternative.
fn scan_html_comment(cursor: &mut impl Cursor) -> bool {
    while matches!(cursor.lookahead(), Some(ch) if is_space(ch)) {
        cursor.skip();
    }

    let marker = match cursor.lookahead() {
        Some('<') => "<!--",
        Some('-') => "-->",
        _ => return false,
    };
    for expected in marker.chars() {
        if cursor.lookahead() != Some(expected) {
            return false;
        }
        cursor.advance();
    }

    while matches!(cursor.lookahead(), Some(ch) if !is_line_terminator(ch)) {
        cursor.advance();
    }

    cursor.set_token_kind(TokenKind::HtmlComment);
    cursor.mark_end();
    true
}
