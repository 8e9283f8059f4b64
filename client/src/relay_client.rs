//! HTTP client for the admin relay's override endpoint.

use std::time::Duration;

use faceid_types::AccountId;
use serde::Deserialize;
use tracing::info;

use crate::ClientError;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Operator-side client for `POST /verify-user`.
///
/// Wraps `reqwest::Client` with the relay's base URL and the bearer token the
/// relay expects. Relay-side failures are surfaced with the relay's own error
/// message, unmodified.
#[derive(Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    relay_url: String,
    token: String,
}

impl RelayClient {
    /// Create a client targeting the given base URL (e.g. `http://127.0.0.1:3001`).
    pub fn new(relay_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ClientError::Relay(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            relay_url: relay_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// The configured relay URL.
    pub fn relay_url(&self) -> &str {
        &self.relay_url
    }

    /// Ask the relay to set `account`'s verification flag.
    pub async fn set_verified(&self, account: &AccountId, verified: bool) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/verify-user", self.relay_url))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "userAddress": account,
                "isVerified": verified,
            }))
            .send()
            .await
            .map_err(|e| ClientError::Relay(format!("request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            info!(%account, verified, "relay accepted override");
            return Ok(());
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(ClientError::Relay(format!("relay returned HTTP {status}: {message}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = RelayClient::new("http://127.0.0.1:3001/", "t").unwrap();
        assert_eq!(client.relay_url(), "http://127.0.0.1:3001");
    }

    #[tokio::test]
    async fn unreachable_relay_is_reported() {
        let client = RelayClient::new("http://127.0.0.1:9", "t").unwrap();
        let err = client
            .set_verified(&AccountId::new([1; 20]), true)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Relay(_)));
    }
}
