//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use faceid_capture::CameraSettings;
use faceid_types::{DEFAULT_MATCH_THRESHOLD, EMBEDDING_DIM};

use crate::ClientError;

/// Configuration for a capture session.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Embedding dimension shared by the extractor, the encoder and the decoder.
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,

    /// Distance below which a capture matches the committed signature.
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,

    /// Upper bound on camera open + frame grab + extraction, in milliseconds.
    #[serde(default = "default_capture_timeout_ms")]
    pub capture_timeout_ms: u64,

    /// Frames to try within one capture before reporting no face.
    #[serde(default = "default_max_capture_attempts")]
    pub max_capture_attempts: u32,

    /// Stream constraints requested from the camera.
    #[serde(default)]
    pub camera: CameraSettings,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_embedding_dim() -> usize {
    EMBEDDING_DIM
}

fn default_match_threshold() -> f64 {
    DEFAULT_MATCH_THRESHOLD
}

fn default_capture_timeout_ms() -> u64 {
    10_000
}

fn default_max_capture_attempts() -> u32 {
    1
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    ///
    /// Parsing does not validate; [`FaceSession::new`](crate::FaceSession::new)
    /// runs [`validate`](Self::validate) before a session uses the values.
    pub fn from_toml_file(path: &str) -> Result<Self, ClientError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ClientError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        toml::from_str(s).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ClientError> {
        toml::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))
    }

    pub fn capture_timeout(&self) -> Duration {
        Duration::from_millis(self.capture_timeout_ms)
    }

    /// Reject values no session can run with.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.embedding_dim == 0 {
            return Err(ClientError::Config("embedding_dim must be positive".into()));
        }
        if !self.match_threshold.is_finite() || self.match_threshold < 0.0 {
            return Err(ClientError::Config(format!(
                "match_threshold must be a finite non-negative number, got {}",
                self.match_threshold
            )));
        }
        if self.capture_timeout_ms == 0 {
            return Err(ClientError::Config("capture_timeout_ms must be positive".into()));
        }
        if self.max_capture_attempts == 0 {
            return Err(ClientError::Config(
                "max_capture_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            embedding_dim: default_embedding_dim(),
            match_threshold: default_match_threshold(),
            capture_timeout_ms: default_capture_timeout_ms(),
            max_capture_attempts: default_max_capture_attempts(),
            camera: CameraSettings::default(),
        }
    }
}
