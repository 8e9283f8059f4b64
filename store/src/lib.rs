//! Identity ledger contract for FaceID.
//!
//! Every ledger backend (LMDB, a remote chain, in-memory for testing) implements
//! [`IdentityLedger`]. The rest of the codebase depends only on the trait.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::{IdentityLedger, LedgerReceipt};
