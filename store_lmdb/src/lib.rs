//! LMDB storage backend for the FaceID identity ledger.
//!
//! Implements [`faceid_store::IdentityLedger`] on top of the `heed` LMDB bindings.
//! Records live in one database keyed by the 20 raw account bytes; bookkeeping
//! (schema version, pinned admin identity, write sequence) lives in a second.
//! LMDB admits a single writer at a time, which is what serializes concurrent
//! enrollments for the same account.

pub mod environment;
pub mod error;
pub mod ledger;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use ledger::LmdbLedger;
