//! Error types for code block compilation.

use thiserror::Error;
use weft_core::ProtocolViolation;
use weft_syntax::ClassifyError;

/// Why a code block could not be highlighted.
///
/// The document walker logs these and leaves the block as it was.
#[derive(Debug, Error)]
pub enum BlockError {
    /// The classifier produced no event stream.
    #[error("classification failed: {0}")]
    Classification(#[from] ClassifyError),

    /// The classifier's event stream broke the replay contract.
    #[error("malformed highlight events: {0}")]
    Protocol(#[from] ProtocolViolation),
}
