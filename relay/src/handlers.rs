//! HTTP handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use faceid_types::AccountId;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{RelayError, RelayState};

// ── Override ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyUserRequest {
    pub user_address: String,
    pub is_verified: bool,
}

#[derive(Debug, Serialize)]
pub struct VerifyUserResponse {
    pub success: bool,
}

/// `POST /verify-user`
pub async fn verify_user(
    State(state): State<Arc<RelayState>>,
    payload: Result<Json<VerifyUserRequest>, JsonRejection>,
) -> Result<Json<VerifyUserResponse>, RelayError> {
    let Json(request) = payload.map_err(|e| RelayError::InvalidRequest(e.body_text()))?;
    let account = AccountId::parse(&request.user_address)
        .map_err(|e| RelayError::InvalidRequest(e.to_string()))?;

    let started = Instant::now();
    let result = state.relay.set_verified(&account, request.is_verified).await;
    state
        .metrics
        .ledger_write_ms
        .observe(started.elapsed().as_secs_f64() * 1000.0);

    match result {
        Ok(_) => {
            state.metrics.overrides_accepted.inc();
            Ok(Json(VerifyUserResponse { success: true }))
        }
        Err(e) => {
            state.metrics.overrides_rejected.inc();
            Err(e.into())
        }
    }
}

// ── Health ───────────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ── Metrics ──────────────────────────────────────────────────────────────

/// `GET /metrics`
pub async fn metrics(State(state): State<Arc<RelayState>>) -> Response {
    match state.metrics.encode() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
