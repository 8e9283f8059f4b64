//! FaceID daemon: runs the admin relay and offers operator tools.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use faceid_client::RelayClient;
use faceid_relay::{RelayConfig, RelayServer};
use faceid_store::IdentityLedger;
use faceid_store_lmdb::LmdbLedger;
use faceid_types::AccountId;
use faceid_utils::LogFormat;

#[derive(Parser)]
#[command(name = "faceid-daemon", about = "FaceID admin relay daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "FACEID_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for ledger storage.
    #[arg(long, env = "FACEID_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Address the relay binds to.
    #[arg(long, env = "FACEID_LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Relay HTTP port.
    #[arg(long, env = "FACEID_PORT")]
    port: Option<u16>,

    /// Administrative account (0x-prefixed, 20 bytes) the relay writes with.
    #[arg(long, env = "FACEID_ADMIN_ACCOUNT")]
    admin_account: Option<String>,

    /// Accepted bearer tokens (comma-separated). Replaces the file's list.
    #[arg(long = "auth-token", env = "FACEID_AUTH_TOKENS", value_delimiter = ',')]
    auth_tokens: Vec<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "FACEID_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "FACEID_LOG_FORMAT")]
    log_format: Option<String>,

    /// Enable Prometheus metrics endpoint.
    #[arg(long, env = "FACEID_ENABLE_METRICS")]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Admin relay service.
    #[command(name = "relay")]
    Relay {
        #[command(subcommand)]
        action: RelayAction,
    },
    /// Inspect the local ledger.
    #[command(name = "record")]
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Submit a verification override to a running relay.
    #[command(name = "override")]
    Override {
        #[arg(long, default_value = "http://127.0.0.1:3001", env = "FACEID_RELAY_URL")]
        relay_url: String,

        /// Bearer token presented to the relay.
        #[arg(long, env = "FACEID_RELAY_TOKEN")]
        token: String,

        #[arg(long)]
        account: String,

        #[arg(long, action = clap::ArgAction::Set)]
        verified: bool,
    },
}

#[derive(clap::Subcommand)]
enum RelayAction {
    /// Open the ledger and serve the relay until Ctrl-C.
    Run,
}

#[derive(clap::Subcommand)]
enum RecordAction {
    /// Print one account's record as JSON.
    Show {
        #[arg(long)]
        account: String,
    },
}

/// File config as the base, CLI flags and env vars on top.
fn build_config(cli: &Cli) -> anyhow::Result<RelayConfig> {
    let mut config = match cli.config {
        Some(ref path) => RelayConfig::from_toml_file(path)?,
        None => RelayConfig::default(),
    };
    if let Some(ref dir) = cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(ref addr) = cli.listen_addr {
        config.listen_addr = addr.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(ref admin) = cli.admin_account {
        config.admin_account =
            Some(AccountId::parse(admin).context("invalid --admin-account")?);
    }
    if !cli.auth_tokens.is_empty() {
        config.auth_tokens = cli.auth_tokens.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.log_format = format.clone();
    }
    config.enable_metrics |= cli.metrics;
    Ok(config)
}

fn open_ledger(config: &RelayConfig) -> anyhow::Result<LmdbLedger> {
    let admin = config.admin()?;
    LmdbLedger::open(&config.data_dir, admin, config.ledger_map_size).with_context(|| {
        format!("failed to open ledger at {}", config.data_dir.display())
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let format: LogFormat = config.log_format.parse()?;
    faceid_utils::init_tracing(&config.log_level, format)?;
    if let Some(ref path) = cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Relay { action } => match action {
            RelayAction::Run => {
                config.validate()?;
                let ledger: Arc<dyn IdentityLedger> = Arc::new(open_ledger(&config)?);
                tracing::info!(
                    "Starting admin relay on {}:{} (data dir {}, metrics {})",
                    config.listen_addr,
                    config.port,
                    config.data_dir.display(),
                    if config.enable_metrics { "on" } else { "off" },
                );

                RelayServer::new(config, ledger)?.start().await?;
                tracing::info!("FaceID daemon exited cleanly");
            }
        },
        Command::Record { action } => match action {
            RecordAction::Show { account } => {
                let account = AccountId::parse(&account).context("invalid --account")?;
                let ledger = LmdbLedger::open_existing(&config.data_dir, config.ledger_map_size)
                    .with_context(|| {
                        format!("failed to open ledger at {}", config.data_dir.display())
                    })?;
                let record = ledger.get_record(&account).await?;
                let output = serde_json::json!({
                    "account": account,
                    "enrolled": record.is_enrolled(),
                    "verified": record.verified,
                    "signature": record.signature.as_ref().map(|s| s.to_hex()),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        },
        Command::Override {
            relay_url,
            token,
            account,
            verified,
        } => {
            let account = AccountId::parse(&account).context("invalid --account")?;
            let client = RelayClient::new(relay_url, token)?;
            client.set_verified(&account, verified).await?;
            println!("{account}: verified = {verified}");
        }
    }

    Ok(())
}
