//! Verified session information.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A session the verifier vouched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Who the session belongs to.
    pub subject: String,
    /// Expiry timestamp (seconds since epoch), if the verifier reports one.
    #[serde(default)]
    pub expires_at: Option<u64>,
}

impl Session {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            expires_at: None,
        }
    }

    /// Check if the session is still valid.
    pub fn is_active(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.expires_at.map_or(true, |expiry| expiry > now)
    }
}
