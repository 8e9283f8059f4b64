use std::path::PathBuf;

use faceid_store::LedgerError;
use faceid_types::AccountId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(#[from] heed::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("database is corrupted: {0}")]
    Corruption(String),

    #[error("ledger was created for admin {stored}, refusing to open as {requested}")]
    AdminMismatch {
        stored: AccountId,
        requested: AccountId,
    },

    #[error("no ledger found at {0}")]
    NotFound(PathBuf),

    #[error("unsupported schema version {found} (this build understands {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },
}

impl From<bincode::Error> for LmdbError {
    fn from(e: bincode::Error) -> Self {
        LmdbError::Serialization(e.to_string())
    }
}

impl From<LmdbError> for LedgerError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::Serialization(msg) => LedgerError::Serialization(msg),
            LmdbError::Corruption(msg) => LedgerError::Corruption(msg),
            other => LedgerError::Backend(other.to_string()),
        }
    }
}
