//! The relay proper: forwards overrides to the ledger under the admin identity.

use std::sync::Arc;

use faceid_store::{IdentityLedger, LedgerError, LedgerReceipt};
use faceid_types::AccountId;
use tracing::{info, warn};

/// Forwards verification overrides to the ledger, authenticated as `identity`.
///
/// No retries: a rejection or outage goes straight back to the caller.
#[derive(Clone)]
pub struct AdminRelay {
    ledger: Arc<dyn IdentityLedger>,
    identity: AccountId,
}

impl AdminRelay {
    pub fn new(ledger: Arc<dyn IdentityLedger>, identity: AccountId) -> Self {
        Self { ledger, identity }
    }

    /// The administrative identity the relay signs ledger writes with.
    pub fn identity(&self) -> &AccountId {
        &self.identity
    }

    /// Set `account`'s verification flag to `verified`.
    ///
    /// Does not inspect or require the account's face signature.
    pub async fn set_verified(
        &self,
        account: &AccountId,
        verified: bool,
    ) -> Result<LedgerReceipt, LedgerError> {
        match self
            .ledger
            .set_verified(&self.identity, account, verified)
            .await
        {
            Ok(receipt) => {
                info!(%account, verified, sequence = receipt.sequence, "verification override applied");
                Ok(receipt)
            }
            Err(e) => {
                warn!(%account, verified, error = %e, "verification override rejected by ledger");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faceid_nullables::NullLedger;
    use faceid_types::FaceSignature;

    const ADMIN: AccountId = AccountId::new([0xad; 20]);

    #[tokio::test]
    async fn override_sets_and_clears_flag() {
        let ledger = Arc::new(NullLedger::new(ADMIN));
        let relay = AdminRelay::new(ledger.clone(), ADMIN);
        let target = AccountId::new([2; 20]);

        relay.set_verified(&target, true).await.unwrap();
        assert!(ledger.get_record(&target).await.unwrap().verified);
        relay.set_verified(&target, false).await.unwrap();
        assert!(!ledger.get_record(&target).await.unwrap().verified);
    }

    #[tokio::test]
    async fn override_ignores_enrollment_state() {
        let ledger = Arc::new(NullLedger::new(ADMIN));
        let relay = AdminRelay::new(ledger.clone(), ADMIN);
        let enrolled = AccountId::new([3; 20]);
        ledger
            .enroll(&enrolled, &FaceSignature::new(vec![0; 8]))
            .await
            .unwrap();

        relay.set_verified(&enrolled, true).await.unwrap();
        let record = ledger.get_record(&enrolled).await.unwrap();
        assert!(record.verified);
        assert_eq!(record.signature.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn non_admin_identity_is_rejected_verbatim() {
        let ledger = Arc::new(NullLedger::new(ADMIN));
        let impostor = AccountId::new([9; 20]);
        let relay = AdminRelay::new(ledger.clone(), impostor);

        let err = relay
            .set_verified(&AccountId::new([4; 20]), true)
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized { caller: impostor });
        assert_eq!(ledger.sequence(), 0);
    }
}
