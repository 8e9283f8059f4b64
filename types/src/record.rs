//! Per-account identity record as held by the ledger.

use serde::{Deserialize, Serialize};

use crate::FaceSignature;

/// The ledger's view of one account.
///
/// A record that was never written reads back as [`IdentityRecord::default`]:
/// no signature and `verified == false`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Committed face signature. Written at most once.
    pub signature: Option<FaceSignature>,
    /// Verification flag. Only the administrative caller may change it.
    pub verified: bool,
}

impl IdentityRecord {
    /// Whether a signature has been committed for this account.
    pub fn is_enrolled(&self) -> bool {
        self.signature.as_ref().is_some_and(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_unenrolled_and_unverified() {
        let record = IdentityRecord::default();
        assert!(!record.is_enrolled());
        assert!(!record.verified);
    }

    #[test]
    fn bincode_round_trip() {
        let record = IdentityRecord {
            signature: Some(FaceSignature::new(vec![1, 2, 3, 4])),
            verified: true,
        };
        let bytes = bincode::serialize(&record).unwrap();
        let back: IdentityRecord = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, record);
    }
}
