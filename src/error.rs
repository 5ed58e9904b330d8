//! Error types for the scanner's host-facing contract.
//!
//! An ordinary "not this token" decline is a plain `false` from `scan`, not
//! an error. The variants here cover the two conditions a host actually
//! reports: a state payload where none can exist, and the lexical error
//! behind a [`GapOutcome::Reject`](crate::scanner::GapOutcome::Reject).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// `deserialize` was handed bytes for a scanner that persists nothing.
    #[error("unexpected scanner state payload of {len} bytes (state is always empty)")]
    StatePayload { len: usize },

    /// A `/` that opened neither `//` nor `/*` inside an inter-token gap.
    #[error("malformed comment at offset {offset}")]
    MalformedComment { offset: usize },
}

impl ScanError {
    pub fn state_payload(len: usize) -> Self {
        ScanError::StatePayload { len }
    }

    pub fn malformed_comment(offset: usize) -> Self {
        ScanError::MalformedComment { offset }
    }
}
