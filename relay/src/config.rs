//! Relay configuration with TOML file support.

use std::net::SocketAddr;
use std::path::PathBuf;

use faceid_types::AccountId;
use serde::{Deserialize, Serialize};

use crate::RelayError;

/// Configuration for the admin relay service.
///
/// Can be loaded from a TOML file via [`RelayConfig::from_toml_file`];
/// command-line flags layer on top in the daemon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the ledger environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Administrative identity the relay writes with. Required.
    #[serde(default)]
    pub admin_account: Option<AccountId>,

    /// Bearer tokens accepted on `POST /verify-user`. At least one is required.
    #[serde(default)]
    pub auth_tokens: Vec<String>,

    /// Maximum size of the ledger's memory map, in bytes.
    #[serde(default = "default_ledger_map_size")]
    pub ledger_map_size: usize,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `"human"` or `"json"`.
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Serve Prometheus metrics on `GET /metrics`.
    #[serde(default)]
    pub enable_metrics: bool,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./faceid_data")
}

fn default_ledger_map_size() -> usize {
    1 << 30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl RelayConfig {
    /// Load configuration from a TOML file.
    ///
    /// Parsing does not validate; [`RelayState::new`](crate::RelayState::new)
    /// runs [`validate`](Self::validate) once command-line overrides have
    /// been applied.
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, RelayError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RelayError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, RelayError> {
        toml::from_str(s).map_err(|e| RelayError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, RelayError> {
        toml::to_string_pretty(self).map_err(|e| RelayError::Config(e.to_string()))
    }

    /// The socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, RelayError> {
        format!("{}:{}", self.listen_addr, self.port)
            .parse()
            .map_err(|e| RelayError::Config(format!("invalid listen address: {e}")))
    }

    /// The administrative identity, or a config error if none is set.
    pub fn admin(&self) -> Result<AccountId, RelayError> {
        self.admin_account
            .ok_or_else(|| RelayError::Config("admin_account is required".into()))
    }

    /// Reject configurations the relay must not start with.
    pub fn validate(&self) -> Result<(), RelayError> {
        self.admin()?;
        self.socket_addr()?;
        if self.auth_tokens.is_empty() {
            return Err(RelayError::Config(
                "at least one auth token is required".into(),
            ));
        }
        if self.auth_tokens.iter().any(|t| t.trim().is_empty()) {
            return Err(RelayError::Config("auth tokens must not be blank".into()));
        }
        if self.ledger_map_size == 0 {
            return Err(RelayError::Config("ledger_map_size must be positive".into()));
        }
        if !matches!(self.log_format.as_str(), "human" | "json") {
            return Err(RelayError::Config(format!(
                "log_format must be \"human\" or \"json\", got {:?}",
                self.log_format
            )));
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
            data_dir: default_data_dir(),
            admin_account: None,
            auth_tokens: Vec::new(),
            ledger_map_size: default_ledger_map_size(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            enable_metrics: false,
        }
    }
}
