//! Face verification core.
//!
//! Two pure building blocks, independent of any ledger or network state:
//! 1. **Codec**: lossless little-endian encoding of an embedding into the opaque
//!    signature bytes committed to the ledger, and back.
//! 2. **Engine**: Euclidean distance between two embeddings and a strict
//!    `distance < threshold` match decision.

pub mod codec;
pub mod engine;
pub mod error;

pub use codec::{decode, encode};
pub use engine::{distance, is_match, MatchOutcome, VerificationEngine};
pub use error::VerificationError;
