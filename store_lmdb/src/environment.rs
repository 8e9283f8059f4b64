//! LMDB environment setup and the synchronous record operations.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions, RoTxn, RwTxn};
use tracing::{info, warn};

use faceid_store::{LedgerError, LedgerReceipt};
use faceid_types::{AccountId, FaceSignature, IdentityRecord};

use crate::LmdbError;

/// Current on-disk layout version.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";
const ADMIN_KEY: &[u8] = b"admin";
const SEQUENCE_KEY: &[u8] = b"sequence";

const MAX_DBS: u32 = 2;

/// Wraps the LMDB environment and its database handles.
pub struct LmdbEnvironment {
    env: Env,
    records_db: Database<Bytes, Bytes>,
    meta_db: Database<Bytes, Bytes>,
    admin: AccountId,
}

impl LmdbEnvironment {
    /// Open or create a ledger at `path`.
    ///
    /// A fresh ledger pins `admin` as its administrative caller. Reopening an
    /// existing ledger with a different admin fails with
    /// [`LmdbError::AdminMismatch`].
    pub fn open(path: &Path, admin: AccountId, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // SAFETY: the environment directory is owned by this process; no other
        // handle to the same path is opened with different flags.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let records_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some("records"))?;
        let meta_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some("meta"))?;

        match meta_db.get(&wtxn, SCHEMA_VERSION_KEY)? {
            Some(bytes) => check_schema(decode_u32(bytes)?)?,
            None => meta_db.put(&mut wtxn, SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_le_bytes())?,
        }

        match meta_db.get(&wtxn, ADMIN_KEY)? {
            Some(bytes) => {
                let stored = AccountId::from_slice(bytes)
                    .map_err(|e| LmdbError::Corruption(format!("admin key: {e}")))?;
                if stored != admin {
                    return Err(LmdbError::AdminMismatch {
                        stored,
                        requested: admin,
                    });
                }
            }
            None => {
                meta_db.put(&mut wtxn, ADMIN_KEY, admin.as_bytes().as_slice())?;
                info!(%admin, path = %path.display(), "created identity ledger");
            }
        }
        wtxn.commit()?;

        Ok(Self {
            env,
            records_db,
            meta_db,
            admin,
        })
    }

    /// Open a ledger that already exists at `path`, without creating or
    /// writing anything.
    ///
    /// The admin identity is read from the ledger itself. Fails with
    /// [`LmdbError::NotFound`] if `path` holds no ledger.
    pub fn open_existing(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        if !path.join("data.mdb").is_file() {
            return Err(LmdbError::NotFound(path.to_path_buf()));
        }
        // SAFETY: see `open`.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let rtxn = env.read_txn()?;
        let missing = |name: &str| LmdbError::Corruption(format!("database '{name}' is missing"));
        let records_db = env
            .open_database::<Bytes, Bytes>(&rtxn, Some("records"))?
            .ok_or_else(|| missing("records"))?;
        let meta_db = env
            .open_database::<Bytes, Bytes>(&rtxn, Some("meta"))?
            .ok_or_else(|| missing("meta"))?;

        match meta_db.get(&rtxn, SCHEMA_VERSION_KEY)? {
            Some(bytes) => check_schema(decode_u32(bytes)?)?,
            None => return Err(LmdbError::Corruption("schema_version is missing".into())),
        }
        let admin = match meta_db.get(&rtxn, ADMIN_KEY)? {
            Some(bytes) => AccountId::from_slice(bytes)
                .map_err(|e| LmdbError::Corruption(format!("admin key: {e}")))?,
            None => return Err(LmdbError::Corruption("admin key is missing".into())),
        };
        rtxn.commit()?;

        Ok(Self {
            env,
            records_db,
            meta_db,
            admin,
        })
    }

    /// The administrative caller pinned at creation.
    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    /// Read a record; unknown accounts read back as the default record.
    pub fn read_record(&self, account: &AccountId) -> Result<IdentityRecord, LedgerError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.load(&rtxn, account)?)
    }

    /// Commit a signature to `caller`'s record unless one is already present.
    pub fn enroll(
        &self,
        caller: &AccountId,
        signature: &FaceSignature,
    ) -> Result<LedgerReceipt, LedgerError> {
        if signature.is_empty() {
            return Err(LedgerError::EmptySignature);
        }
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut record = self.load(&wtxn, caller)?;
        if record.signature.is_some() {
            warn!(account = %caller, "rejected enrollment: signature already committed");
            return Err(LedgerError::AlreadyEnrolled(*caller));
        }
        record.signature = Some(signature.clone());
        self.store(&mut wtxn, caller, &record)?;
        let receipt = self.next_receipt(&mut wtxn)?;
        wtxn.commit().map_err(LmdbError::from)?;
        info!(account = %caller, sequence = receipt.sequence, "face signature committed");
        Ok(receipt)
    }

    /// Set `account`'s verification flag on behalf of `caller`.
    pub fn set_verified(
        &self,
        caller: &AccountId,
        account: &AccountId,
        verified: bool,
    ) -> Result<LedgerReceipt, LedgerError> {
        if caller != &self.admin {
            warn!(%caller, %account, "rejected verification flag write from non-admin");
            return Err(LedgerError::Unauthorized { caller: *caller });
        }
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut record = self.load(&wtxn, account)?;
        record.verified = verified;
        self.store(&mut wtxn, account, &record)?;
        let receipt = self.next_receipt(&mut wtxn)?;
        wtxn.commit().map_err(LmdbError::from)?;
        info!(%account, verified, sequence = receipt.sequence, "verification flag set");
        Ok(receipt)
    }

    /// Number of writes accepted so far.
    pub fn sequence(&self) -> Result<u64, LedgerError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.current_sequence(&rtxn)?)
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn load(&self, txn: &RoTxn, account: &AccountId) -> Result<IdentityRecord, LmdbError> {
        match self.records_db.get(txn, account.as_bytes().as_slice())? {
            Some(bytes) => Ok(bincode::deserialize(bytes)?),
            None => Ok(IdentityRecord::default()),
        }
    }

    fn store(
        &self,
        txn: &mut RwTxn,
        account: &AccountId,
        record: &IdentityRecord,
    ) -> Result<(), LmdbError> {
        let bytes = bincode::serialize(record)?;
        self.records_db
            .put(txn, account.as_bytes().as_slice(), &bytes)?;
        Ok(())
    }

    fn current_sequence(&self, txn: &RoTxn) -> Result<u64, LmdbError> {
        match self.meta_db.get(txn, SEQUENCE_KEY)? {
            Some(bytes) => {
                let arr: [u8; 8] = bytes.try_into().map_err(|_| {
                    LmdbError::Corruption("sequence has unexpected byte length".to_string())
                })?;
                Ok(u64::from_le_bytes(arr))
            }
            None => Ok(0),
        }
    }

    fn next_receipt(&self, txn: &mut RwTxn) -> Result<LedgerReceipt, LmdbError> {
        let sequence = self.current_sequence(txn)? + 1;
        self.meta_db.put(txn, SEQUENCE_KEY, &sequence.to_le_bytes())?;
        Ok(LedgerReceipt { sequence })
    }
}

fn check_schema(found: u32) -> Result<(), LmdbError> {
    if found > SCHEMA_VERSION {
        return Err(LmdbError::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    Ok(())
}

fn decode_u32(bytes: &[u8]) -> Result<u32, LmdbError> {
    let arr: [u8; 4] = bytes
        .try_into()
        .map_err(|_| LmdbError::Corruption("schema_version has unexpected byte length".into()))?;
    Ok(u32::from_le_bytes(arr))
}
