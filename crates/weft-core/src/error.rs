//! Error types for event replay.
//!
//! A [`ProtocolViolation`] means the classifier broke the event stream
//! contract. Replay stops at the first violation so no partial node
//! sequence escapes.

use thiserror::Error;

/// Breaches of the highlight event stream contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProtocolViolation {
    /// An `End` event arrived with no open scope.
    #[error("event {index}: end event with no open highlight scope")]
    UnbalancedEnd {
        /// Position of the offending event in the stream.
        index: usize,
    },

    /// The stream finished with scopes still open.
    #[error("event stream ended with {open} highlight scope(s) still open")]
    UnclosedScopes {
        /// Number of scopes left on the stack.
        open: usize,
    },

    /// A source range did not start where the previous one ended.
    #[error("event {index}: source range starts at byte {found}, expected byte {expected}")]
    Discontiguous {
        /// Position of the offending event in the stream.
        index: usize,
        /// Byte the range should have started at.
        expected: usize,
        /// Byte the range actually started at.
        found: usize,
    },

    /// A source range was reversed, ran past the end of the source, or
    /// split a UTF-8 character.
    #[error("event {index}: source range {start}..{end} is invalid for {len} byte(s) of source")]
    InvalidRange {
        /// Position of the offending event in the stream.
        index: usize,
        /// Start of the offending range.
        start: usize,
        /// End of the offending range.
        end: usize,
        /// Length of the source in bytes.
        len: usize,
    },

    /// The stream finished before covering the whole source.
    #[error("event stream covered {covered} of {len} source byte(s)")]
    IncompleteCoverage {
        /// Bytes covered by source events.
        covered: usize,
        /// Length of the source in bytes.
        len: usize,
    },
}
