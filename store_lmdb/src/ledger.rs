//! Async [`IdentityLedger`] facade over [`LmdbEnvironment`].
//!
//! LMDB transactions block the calling thread, so every call is moved onto
//! tokio's blocking pool.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;

use faceid_store::{IdentityLedger, LedgerError, LedgerReceipt};
use faceid_types::{AccountId, FaceSignature, IdentityRecord};

use crate::{LmdbEnvironment, LmdbError};

/// Default LMDB map size: 1 GiB of address space.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

#[derive(Clone)]
pub struct LmdbLedger {
    env: Arc<LmdbEnvironment>,
}

impl LmdbLedger {
    pub fn open(path: &Path, admin: AccountId, map_size: usize) -> Result<Self, LmdbError> {
        Ok(Self {
            env: Arc::new(LmdbEnvironment::open(path, admin, map_size)?),
        })
    }

    /// Open an existing ledger for inspection; nothing is created or written.
    pub fn open_existing(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        Ok(Self {
            env: Arc::new(LmdbEnvironment::open_existing(path, map_size)?),
        })
    }

    pub fn admin(&self) -> &AccountId {
        self.env.admin()
    }

    async fn run<T, F>(&self, op: F) -> Result<T, LedgerError>
    where
        T: Send + 'static,
        F: FnOnce(&LmdbEnvironment) -> Result<T, LedgerError> + Send + 'static,
    {
        let env = Arc::clone(&self.env);
        task::spawn_blocking(move || op(&env))
            .await
            .map_err(|e| LedgerError::Unavailable(format!("ledger worker failed: {e}")))?
    }
}

#[async_trait]
impl IdentityLedger for LmdbLedger {
    async fn get_record(&self, account: &AccountId) -> Result<IdentityRecord, LedgerError> {
        let account = *account;
        self.run(move |env| env.read_record(&account)).await
    }

    async fn enroll(
        &self,
        caller: &AccountId,
        signature: &FaceSignature,
    ) -> Result<LedgerReceipt, LedgerError> {
        let caller = *caller;
        let signature = signature.clone();
        self.run(move |env| env.enroll(&caller, &signature)).await
    }

    async fn set_verified(
        &self,
        caller: &AccountId,
        account: &AccountId,
        verified: bool,
    ) -> Result<LedgerReceipt, LedgerError> {
        let (caller, account) = (*caller, *account);
        self.run(move |env| env.set_verified(&caller, &account, verified))
            .await
    }
}
