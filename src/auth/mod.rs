//! Session resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Request headers
//!     → credentials.rs (cookie / bearer token lookup)
//!     → validator.rs (deadline, failure folding)
//!     → verifier.rs (collaborator contract)
//!         → remote.rs (HTTP session endpoint)
//!         → static_tokens.rs (fixed table)
//!     → Option<Session>
//! ```
//!
//! # Design Decisions
//! - Signing keys and session formats live behind the verifier
//! - "Could not verify" and "not logged in" are the same outcome

pub mod credentials;
pub mod remote;
pub mod session;
pub mod static_tokens;
pub mod validator;
pub mod verifier;

use std::sync::Arc;
use std::time::Duration;

use crate::config::schema::{AuthConfig, VerifierConfig};

pub use credentials::Credentials;
pub use remote::RemoteVerifier;
pub use session::Session;
pub use static_tokens::StaticVerifier;
pub use validator::TokenValidator;
pub use verifier::{SessionVerifier, VerifyError};

/// Build the configured verifier.
pub fn build_verifier(config: &AuthConfig) -> Result<Arc<dyn SessionVerifier>, VerifyError> {
    match &config.verifier {
        VerifierConfig::Remote { url } => {
            let verifier = RemoteVerifier::new(url, Duration::from_millis(config.timeout_ms))?;
            tracing::info!(url = %url, "Using remote session verifier");
            Ok(Arc::new(verifier))
        }
        VerifierConfig::Static { tokens } => {
            tracing::warn!(tokens = tokens.len(), "Using static session tokens; not for production");
            Ok(Arc::new(StaticVerifier::new(tokens.clone())))
        }
    }
}

/// Build a validator around the configured verifier.
pub fn build_validator(config: &AuthConfig) -> Result<TokenValidator, VerifyError> {
    let verifier = build_verifier(config)?;
    Ok(TokenValidator::new(
        verifier,
        config.cookie_name.clone(),
        Duration::from_millis(config.timeout_ms),
    ))
}
