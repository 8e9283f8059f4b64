//! The identity ledger trait.

use async_trait::async_trait;
use faceid_types::{AccountId, FaceSignature, IdentityRecord};
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Confirmation of an accepted write.
///
/// Returned only once the write is durable; a read issued after receiving the
/// receipt observes the write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReceipt {
    /// Position of the write in the ledger's serialized write order.
    pub sequence: u64,
}

/// Authoritative, append-restricted store of identity records.
///
/// Exactly one read path and two write paths:
/// - [`get_record`](Self::get_record): never fails for a well-formed account
///   (outages aside); unknown accounts read back as [`IdentityRecord::default`].
/// - [`enroll`](Self::enroll): the caller commits a signature to its own
///   record, at most once.
/// - [`set_verified`](Self::set_verified): only the ledger's administrative
///   caller may flip the flag.
///
/// Writes are atomic: readers never observe a partially applied write. Two
/// concurrent enrollments for the same account are serialized by the backend, so
/// exactly one succeeds.
#[async_trait]
pub trait IdentityLedger: Send + Sync {
    async fn get_record(&self, account: &AccountId) -> Result<IdentityRecord, LedgerError>;

    /// Commit `signature` to `caller`'s own record.
    ///
    /// Fails with [`LedgerError::AlreadyEnrolled`] if a signature is already
    /// present, leaving the stored one untouched.
    async fn enroll(
        &self,
        caller: &AccountId,
        signature: &FaceSignature,
    ) -> Result<LedgerReceipt, LedgerError>;

    /// Set the verification flag of `account`.
    ///
    /// Fails with [`LedgerError::Unauthorized`] unless `caller` is the ledger's
    /// administrative identity.
    async fn set_verified(
        &self,
        caller: &AccountId,
        account: &AccountId,
        verified: bool,
    ) -> Result<LedgerReceipt, LedgerError>;
}
