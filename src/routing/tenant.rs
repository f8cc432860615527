//! Tenant identity types.

use std::fmt;

/// Returns true if `label` can name a tenant: non-empty, `[a-z0-9-]` only.
pub fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// A tenant label extracted from a request host.
///
/// Only the host parser constructs these, so every value has passed
/// [`is_valid_label`] and the configured banned-label checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantIdentifier(String);

impl TenantIdentifier {
    pub(crate) fn parse(label: &str) -> Option<Self> {
        is_valid_label(label).then(|| Self(label.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of application a request is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantKind {
    /// No tenant: the base host.
    Root,
    /// The reserved admin label.
    Admin,
    /// Any other tenant.
    User(TenantIdentifier),
}

impl TenantKind {
    /// Classify an optional identifier against the reserved admin label.
    pub fn classify(id: Option<TenantIdentifier>, admin_label: &str) -> Self {
        match id {
            None => TenantKind::Root,
            Some(id) if id.as_str() == admin_label => TenantKind::Admin,
            Some(id) => TenantKind::User(id),
        }
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            TenantKind::Root => "root",
            TenantKind::Admin => "admin",
            TenantKind::User(_) => "user",
        }
    }
}
