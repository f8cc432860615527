//! Fixed token table verifier for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::auth::session::Session;
use crate::auth::verifier::{SessionVerifier, VerifyError};

/// Accepts exactly the configured tokens.
#[derive(Debug, Clone, Default)]
pub struct StaticVerifier {
    tokens: HashMap<String, String>,
}

impl StaticVerifier {
    /// `tokens` maps token → subject.
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }

    pub fn with_token(mut self, token: impl Into<String>, subject: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), subject.into());
        self
    }
}

#[async_trait]
impl SessionVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<Option<Session>, VerifyError> {
        Ok(self.tokens.get(token).map(Session::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup() {
        let verifier = StaticVerifier::default().with_token("tok-1", "alice");
        assert_eq!(verifier.verify("tok-1").await.unwrap(), Some(Session::new("alice")));
        assert_eq!(verifier.verify("tok-2").await.unwrap(), None);
    }
}
