//! Router assembly and the HTTP server.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use faceid_store::IdentityLedger;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{auth, handlers, AdminRelay, RelayConfig, RelayError, RelayMetrics};

/// Shared state behind every handler.
pub struct RelayState {
    pub relay: AdminRelay,
    pub auth_tokens: Vec<String>,
    pub metrics: RelayMetrics,
    pub enable_metrics: bool,
}

impl RelayState {
    /// Build state from a validated config and an open ledger.
    pub fn new(config: &RelayConfig, ledger: Arc<dyn IdentityLedger>) -> Result<Self, RelayError> {
        config.validate()?;
        let metrics = RelayMetrics::new().map_err(|e| RelayError::Server(e.to_string()))?;
        Ok(Self {
            relay: AdminRelay::new(ledger, config.admin()?),
            auth_tokens: config.auth_tokens.clone(),
            metrics,
            enable_metrics: config.enable_metrics,
        })
    }
}

/// The relay's routes. Only `/verify-user` requires a token.
pub fn router(state: Arc<RelayState>) -> Router {
    let protected = Router::new()
        .route("/verify-user", post(handlers::verify_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ));

    let mut app = Router::new()
        .merge(protected)
        .route("/health", get(handlers::health));
    if state.enable_metrics {
        app = app.route("/metrics", get(handlers::metrics));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

pub struct RelayServer {
    config: RelayConfig,
    state: Arc<RelayState>,
}

impl RelayServer {
    pub fn new(config: RelayConfig, ledger: Arc<dyn IdentityLedger>) -> Result<Self, RelayError> {
        let state = Arc::new(RelayState::new(&config, ledger)?);
        Ok(Self { config, state })
    }

    pub fn state(&self) -> &Arc<RelayState> {
        &self.state
    }

    /// Bind the listener and serve until Ctrl-C.
    pub async fn start(self) -> Result<(), RelayError> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| RelayError::Server(format!("failed to bind {addr}: {e}")))?;
        info!(
            %addr,
            admin = %self.state.relay.identity(),
            metrics = self.state.enable_metrics,
            "admin relay listening"
        );

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| RelayError::Server(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
