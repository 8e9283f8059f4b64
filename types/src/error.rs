//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while constructing the shared FaceID types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FaceIdError {
    #[error("invalid account identifier: {0}")]
    InvalidAccount(String),

    #[error("invalid signature encoding: {0}")]
    InvalidSignatureHex(String),
}
