//! Fundamental types for FaceID.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account identifiers, face embeddings, their on-ledger signatures, identity
//! records, and the protocol constants both sides of the codec agree on.

pub mod account;
pub mod embedding;
pub mod error;
pub mod params;
pub mod record;

pub use account::AccountId;
pub use embedding::{Embedding, FaceSignature};
pub use error::FaceIdError;
pub use params::{signature_len, DEFAULT_MATCH_THRESHOLD, EMBEDDING_DIM, FLOAT_WIDTH};
pub use record::IdentityRecord;
