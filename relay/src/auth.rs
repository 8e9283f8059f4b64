//! Bearer-token authentication for the override endpoint.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::{RelayError, RelayState};

/// Pull the presented token from `X-Api-Key`, falling back to
/// `Authorization: Bearer <token>`.
///
/// The scheme name is matched case-insensitively. An `Authorization` header
/// with another scheme carries no token.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(key) = headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        return Some(key.trim());
    }
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim_start();
    let (scheme, token) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
}

/// Whether `candidate` equals one of `accepted`.
///
/// Every accepted token is compared in constant time, and the scan does not
/// stop at the first hit.
pub fn token_matches(candidate: &str, accepted: &[String]) -> bool {
    let mut hit = subtle::Choice::from(0u8);
    for token in accepted {
        hit |= candidate.as_bytes().ct_eq(token.as_bytes());
    }
    bool::from(hit)
}

/// Middleware guarding `POST /verify-user`.
pub async fn require_token(
    State(state): State<Arc<RelayState>>,
    request: Request,
    next: Next,
) -> Result<Response, RelayError> {
    let Some(token) = extract_token(request.headers()) else {
        state.metrics.unauthorized_requests.inc();
        warn!(uri = %request.uri(), "override request without credentials");
        return Err(RelayError::MissingCredentials);
    };
    if token.is_empty() || !token_matches(token, &state.auth_tokens) {
        state.metrics.unauthorized_requests.inc();
        warn!(uri = %request.uri(), "override request with invalid credentials");
        return Err(RelayError::InvalidCredentials);
    }
    Ok(next.run(request).await)
}
