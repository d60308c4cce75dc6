//! Error type for configuration and digest parsing failures

use thiserror::Error;

/// Errors reported by VectorHash.
///
/// All of them are raised before any hashing starts, so a failed call never
/// leaves a partially computed digest behind.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// Width is not a power of two in `32..=1024`
    #[error("invalid hash width {0}: must be 32, 64, 128, 256, 512, or 1024")]
    InvalidWidth(usize),

    /// Hex digest has the wrong number of characters for the width
    #[error("invalid digest length: expected {expected} hex digits, got {actual}")]
    InvalidDigestLength { expected: usize, actual: usize },

    /// Hex digest contains something other than hex digits
    #[error("invalid hex digest: {0}")]
    InvalidHex(hex::FromHexError),
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::InvalidHex(err)
    }
}
