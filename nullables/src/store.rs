//! Nullable ledger: thread-safe in-memory identity ledger for testing.

use async_trait::async_trait;
use faceid_store::{IdentityLedger, LedgerError, LedgerReceipt};
use faceid_types::{AccountId, FaceSignature, IdentityRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct LedgerState {
    records: HashMap<AccountId, IdentityRecord>,
    sequence: u64,
}

/// An in-memory identity ledger for testing.
///
/// Writes are serialized by a single mutex, mirroring a real ledger's
/// transaction ordering. The ledger can be taken offline to exercise
/// unavailability handling.
pub struct NullLedger {
    admin: AccountId,
    state: Mutex<LedgerState>,
    available: AtomicBool,
}

impl NullLedger {
    pub fn new(admin: AccountId) -> Self {
        Self {
            admin,
            state: Mutex::new(LedgerState::default()),
            available: AtomicBool::new(true),
        }
    }

    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    /// Simulate an outage (`false`) or recovery (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Write a record directly, bypassing the write-once and admin checks.
    ///
    /// Lets tests plant states the contract can't produce, such as a corrupt
    /// signature.
    pub fn insert_record(&self, account: AccountId, record: IdentityRecord) {
        self.state.lock().unwrap().records.insert(account, record);
    }

    /// Number of accounts with a stored record.
    pub fn record_count(&self) -> usize {
        self.state.lock().unwrap().records.len()
    }

    /// Number of writes accepted so far.
    pub fn sequence(&self) -> u64 {
        self.state.lock().unwrap().sequence
    }

    fn ensure_available(&self) -> Result<(), LedgerError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(LedgerError::Unavailable("null ledger is offline".to_string()))
        }
    }
}

#[async_trait]
impl IdentityLedger for NullLedger {
    async fn get_record(&self, account: &AccountId) -> Result<IdentityRecord, LedgerError> {
        self.ensure_available()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .records
            .get(account)
            .cloned()
            .unwrap_or_default())
    }

    async fn enroll(
        &self,
        caller: &AccountId,
        signature: &FaceSignature,
    ) -> Result<LedgerReceipt, LedgerError> {
        self.ensure_available()?;
        if signature.is_empty() {
            return Err(LedgerError::EmptySignature);
        }
        let mut state = self.state.lock().unwrap();
        let record = state.records.entry(*caller).or_default();
        if record.signature.is_some() {
            return Err(LedgerError::AlreadyEnrolled(*caller));
        }
        record.signature = Some(signature.clone());
        state.sequence += 1;
        Ok(LedgerReceipt {
            sequence: state.sequence,
        })
    }

    async fn set_verified(
        &self,
        caller: &AccountId,
        account: &AccountId,
        verified: bool,
    ) -> Result<LedgerReceipt, LedgerError> {
        self.ensure_available()?;
        if caller != &self.admin {
            return Err(LedgerError::Unauthorized { caller: *caller });
        }
        let mut state = self.state.lock().unwrap();
        state.records.entry(*account).or_default().verified = verified;
        state.sequence += 1;
        Ok(LedgerReceipt {
            sequence: state.sequence,
        })
    }
}
