//! Error types.

use core::fmt::{self, Display};

/// Errors produced while constructing or generating X25519 keys.
///
/// Neither a malformed u-coordinate nor a low-order peer key is an error:
/// the former is normalized and the latter yields an all-zero
/// [`SharedSecret`](crate::SharedSecret).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A key was decoded from a byte slice of the wrong length.
    InvalidKeyLength {
        /// Required length in bytes.
        expected: usize,
        /// Length of the slice that was supplied.
        actual: usize,
    },

    /// The random number generator failed to produce key material.
    ///
    /// Generation may be retried.
    Entropy,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected} bytes, got {actual}")
            }
            Error::Entropy => f.write_str("random number generator failure"),
        }
    }
}

impl core::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
