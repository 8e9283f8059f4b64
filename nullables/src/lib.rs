//! Nullable infrastructure for deterministic testing.
//!
//! All external collaborators (ledger, camera, embedding model) are abstracted
//! behind traits. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem, a device, or the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod camera;
pub mod extractor;
pub mod store;

pub use camera::NullCamera;
pub use extractor::NullExtractor;
pub use store::NullLedger;
