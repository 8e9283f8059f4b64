//! Admin relay for FaceID.
//!
//! A privileged service that forwards operator overrides of the ledger's
//! verification flag, signing the ledger write with its own administrative
//! identity. It does not run the biometric matcher: an override is a deliberate
//! transfer of trust from a human operator, not a verification.
//!
//! Endpoints:
//! - `POST /verify-user`: authenticated override `{userAddress, isVerified}`
//! - `GET /health`: liveness probe
//! - `GET /metrics`: Prometheus exposition (when enabled)

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod relay;
pub mod server;

pub use config::RelayConfig;
pub use error::RelayError;
pub use metrics::RelayMetrics;
pub use relay::AdminRelay;
pub use server::{router, RelayServer, RelayState};
