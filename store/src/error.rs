use faceid_types::AccountId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {0} already has a committed face signature")]
    AlreadyEnrolled(AccountId),

    #[error("caller {caller} is not authorized to set verification flags")]
    Unauthorized { caller: AccountId },

    #[error("refusing to enroll an empty signature")]
    EmptySignature,

    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    #[error("ledger backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("ledger is corrupted: {0}")]
    Corruption(String),
}
