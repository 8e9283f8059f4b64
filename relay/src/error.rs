//! Relay error types and their HTTP rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use faceid_store::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("missing credentials: provide 'Authorization: Bearer <token>' or 'X-Api-Key'")]
    MissingCredentials,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("server error: {0}")]
    Server(String),

    /// Ledger rejections are reported with the ledger's own message.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingCredentials | RelayError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Config(_) | RelayError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Ledger(e) => match e {
                LedgerError::Unauthorized { .. } => StatusCode::FORBIDDEN,
                LedgerError::AlreadyEnrolled(_) => StatusCode::CONFLICT,
                LedgerError::EmptySignature => StatusCode::BAD_REQUEST,
                LedgerError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                LedgerError::Backend(_)
                | LedgerError::Serialization(_)
                | LedgerError::Corruption(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
