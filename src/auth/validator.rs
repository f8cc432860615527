//! Token validation adapter.
//!
//! # Responsibilities
//! - Locate the session token in the credential container
//! - Ask the verifier, under a deadline
//! - Fold every failure into "no session"
//!
//! # Design Decisions
//! - Fail closed: errors, timeouts and expired sessions all read as absent
//! - No retries; retry policy belongs to the verifier
//! - Errors are logged here and nowhere else

use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::auth::credentials::Credentials;
use crate::auth::session::Session;
use crate::auth::verifier::SessionVerifier;
use crate::observability::metrics;

/// Resolves a request's credentials to a verified session.
#[derive(Clone)]
pub struct TokenValidator {
    verifier: Arc<dyn SessionVerifier>,
    cookie_name: String,
    deadline: Duration,
}

impl TokenValidator {
    pub fn new(
        verifier: Arc<dyn SessionVerifier>,
        cookie_name: impl Into<String>,
        deadline: Duration,
    ) -> Self {
        Self {
            verifier,
            cookie_name: cookie_name.into(),
            deadline,
        }
    }

    /// Returns the verified session, or `None` if identity could not be proven.
    pub async fn resolve(&self, credentials: &Credentials) -> Option<Session> {
        let Some(token) = credentials.token(&self.cookie_name) else {
            metrics::record_session_check("absent");
            return None;
        };

        match timeout(self.deadline, self.verifier.verify(token)).await {
            Ok(Ok(Some(session))) if session.is_active() => {
                metrics::record_session_check("valid");
                Some(session)
            }
            Ok(Ok(Some(session))) => {
                tracing::debug!(subject = %session.subject, "Session expired");
                metrics::record_session_check("absent");
                None
            }
            Ok(Ok(None)) => {
                metrics::record_session_check("absent");
                None
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Session verification failed; treating as unauthenticated");
                metrics::record_session_check("error");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.deadline.as_millis() as u64,
                    "Session verification timed out; treating as unauthenticated"
                );
                metrics::record_session_check("timeout");
                None
            }
        }
    }
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("cookie_name", &self.cookie_name)
            .field("deadline", &self.deadline)
            .finish()
    }
}
