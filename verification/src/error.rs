use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("malformed signature: {len} bytes is not a multiple of {width}")]
    MalformedSignature { len: usize, width: usize },
}
