//! Client core: capture session, enrollment and verification flows.
//!
//! A [`FaceSession`] bundles everything a holder's device needs (account,
//! camera, embedding model, ledger handle, thresholds) into one explicit
//! context object, so no flow depends on ambient mutable state.

pub mod config;
pub mod error;
pub mod relay_client;
pub mod session;

pub use config::ClientConfig;
pub use error::ClientError;
pub use relay_client::RelayClient;
pub use session::FaceSession;
