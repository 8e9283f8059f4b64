//! Shared utilities for FaceID services.

pub mod logging;

pub use logging::{init_tracing, LogFormat, LoggingError};
