use std::time::Duration;

use faceid_capture::CaptureError;
use faceid_store::LedgerError;
use faceid_types::AccountId;
use faceid_verification::VerificationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no face detected")]
    NoFaceDetected,

    #[error("no registered face found for {0}")]
    NotEnrolled(AccountId),

    #[error("capture timed out after {0:?}")]
    CaptureTimeout(Duration),

    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("verification error: {0}")]
    Verification(#[from] VerificationError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("relay error: {0}")]
    Relay(String),
}

impl ClientError {
    /// Whether a fresh capture attempt may succeed where this one failed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::NoFaceDetected | ClientError::CaptureTimeout(_)
        )
    }
}
