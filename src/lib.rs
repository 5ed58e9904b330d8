//! External scanner for a TypeScript-like dialect grammar.
//!
//! A grammar-driven parser resolves most tokens from context-free rules; a
//! handful need lookahead-sensitive, stateful scanning — raw template
//! content, the ternary `?` versus optional chaining `?.`, whether an
//! inter-token gap licenses automatic statement termination, and the legacy
//! `<!--`/`-->` comment form. This crate implements those routines behind a
//! cursor seam supplied by the host.
//!
//! The scanner keeps no state between calls, so speculative or incremental
//! re-invocation at arbitrary source offsets is always safe.
//!
//! # Example
//!
//! ```
//! use tszscan::{scan, SourceCursor, TokenKind, TokenSet};
//!
//! // Inside a template literal, after the opening backtick:
//! let mut cursor = SourceCursor::new("hello ${name}`");
//! assert!(scan(&mut cursor, TokenSet::TEMPLATE_CONTENT));
//! assert_eq!(cursor.token_kind(), Some(TokenKind::TemplateContent));
//! assert_eq!(cursor.token_text(), Some("hello "));
//! ```

pub mod cursor;
pub mod error;
pub mod scanner;

pub use cursor::{Cursor, CursorCheckpoint, SourceCursor, Span};
pub use error::ScanError;
pub use scanner::{
    GapOutcome, GapScan, TokenKind, TokenSet, scan, scan_whitespace_and_comments,
};

/// Stateless scanner satisfying the host's lifecycle call shape.
///
/// The free functions in [`scanner`] are the real API; this type exists for
/// hosts whose plugin contract expects create/destroy/serialize/deserialize
/// hooks around `scan`. Persistent state is empty by design, so `serialize`
/// always writes zero bytes and `deserialize` accepts only an empty buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Scanner;

impl Scanner {
    pub fn new() -> Self {
        Scanner
    }

    /// Write persistent state into `buf`, returning the byte count: always 0.
    pub fn serialize(&self, _buf: &mut [u8]) -> usize {
        0
    }

    /// Restore persistent state from `buf`.
    ///
    /// Only a zero-length buffer is valid input.
    pub fn deserialize(&mut self, buf: &[u8]) -> Result<(), ScanError> {
        if buf.is_empty() {
            Ok(())
        } else {
            Err(ScanError::state_payload(buf.len()))
        }
    }

    /// Attempt recognition at the cursor position; see [`scanner::scan`].
    pub fn scan(&self, cursor: &mut impl Cursor, valid: TokenSet) -> bool {
        scanner::scan(cursor, valid)
    }
}
