//! HTTP session endpoint verifier.
//!
//! Sends `GET <url>` with `Authorization: Bearer <token>`:
//! - `200` with a JSON [`Session`] body → valid
//! - `401`, `403`, `404` → not valid
//! - anything else → error

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use crate::auth::session::Session;
use crate::auth::verifier::{SessionVerifier, VerifyError};

/// Verifies tokens against a remote session endpoint.
#[derive(Debug, Clone)]
pub struct RemoteVerifier {
    client: reqwest::Client,
    url: url::Url,
}

impl RemoteVerifier {
    /// Create a verifier for `url`. The client-level timeout backs up the
    /// validator's own deadline.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, VerifyError> {
        let url: url::Url = url
            .parse()
            .map_err(|e| VerifyError::Unreachable(format!("invalid session URL '{}': {}", url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| VerifyError::Unreachable(e.to_string()))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl SessionVerifier for RemoteVerifier {
    async fn verify(&self, token: &str) -> Result<Option<Session>, VerifyError> {
        let response = self
            .client
            .get(self.url.clone())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| VerifyError::Unreachable(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<Session>()
                .await
                .map(Some)
                .map_err(|e| VerifyError::Malformed(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(None),
            status => Err(VerifyError::Status(status.as_u16())),
        }
    }
}
