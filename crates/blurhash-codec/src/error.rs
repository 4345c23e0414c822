//! Error types for BlurHash encoding, decoding and validation.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BlurhashError>;

/// Errors that can occur while encoding or decoding a BlurHash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlurhashError {
    /// The component count is out of the valid range (1..=9).
    #[error("component count out of range: {component} = {value} (must be 1..=9)")]
    InvalidComponentCount {
        /// Which component axis ("x" or "y").
        component: &'static str,
        /// The invalid value.
        value: u32,
    },

    /// A caller-supplied argument was rejected before any work was done.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The string is not a structurally valid BlurHash.
    #[error("{hash:?} is not a valid blurhash: {reason}")]
    MalformedHash {
        /// The rejected input.
        hash: String,
        /// Which structural check failed.
        reason: String,
    },

    /// A hash passed validation but could not be reconstructed.
    #[error("failed to decode blurhash: {0}")]
    DecodeFailure(String),

    /// An invalid character was encountered during base83 decoding.
    #[error("invalid base83 character: {0:?}")]
    InvalidBase83Character(char),

    /// A value does not fit into the requested number of base83 digits.
    #[error("value {value} does not fit in {digits} base83 digit(s)")]
    Base83Overflow {
        /// The value being encoded, or `u64::MAX` when decoding overflowed.
        value: u64,
        /// Number of digits available.
        digits: usize,
    },
}

impl BlurhashError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        BlurhashError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
