//! Session verification collaborator contract.

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::session::Session;

/// Errors a verifier may report. The router never surfaces them to clients.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The verification endpoint could not be reached.
    #[error("session endpoint unreachable: {0}")]
    Unreachable(String),

    /// The endpoint answered with an unexpected status.
    #[error("session endpoint returned status {0}")]
    Status(u16),

    /// The endpoint answered with a body we could not read.
    #[error("malformed session response: {0}")]
    Malformed(String),
}

/// Something that can tell whether a session token is valid.
///
/// Implementations must be free of observable side effects; the router calls
/// `verify` at most once per request and never retries.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// `Ok(None)` means the token was checked and is not valid.
    async fn verify(&self, token: &str) -> Result<Option<Session>, VerifyError>;
}
