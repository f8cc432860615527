//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Catch routing setups that cannot work (login page behind login)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use axum::http::uri::Authority;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

use crate::config::schema::{RouterConfig, VerifierConfig, PLACEHOLDER_API_KEY};
use crate::routing::path::PathClassifier;
use crate::routing::tenant::is_valid_label;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("tenancy.domains must not be empty")]
    NoDomains,

    #[error("domain suffix '{0}' must be non-empty without leading or trailing dots")]
    BadSuffix(String),

    #[error("domain suffix '{suffix}' needs min_labels >= 2, got {min_labels}")]
    MinLabels { suffix: String, min_labels: usize },

    #[error("tenancy.base_hosts must not be empty")]
    NoBaseHosts,

    #[error("tenancy.default_url '{0}' is not an absolute http(s) URL")]
    BadDefaultUrl(String),

    #[error("tenancy.admin_label '{0}' is not a valid tenant label")]
    BadAdminLabel(String),

    #[error("{field} '{value}' must start with '/'")]
    NotAbsolutePath { field: &'static str, value: String },

    #[error("{field} '{value}' must not end with '/'")]
    TrailingSlash { field: &'static str, value: String },

    #[error("tenancy.login_path '{0}' is not exempt; unauthenticated requests would loop")]
    LoginNotExempt(String),

    #[error("auth.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("auth.verifier.url '{0}' is not a valid URL")]
    BadVerifierUrl(String),

    #[error("{field} '{value}' is not a valid address")]
    BadAddress { field: &'static str, value: String },

    #[error("admin API enabled with the placeholder api_key")]
    PlaceholderApiKey,
}

/// Check a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let tenancy = &config.tenancy;

    if tenancy.domains.is_empty() {
        errors.push(ValidationError::NoDomains);
    }
    for rule in &tenancy.domains {
        if rule.suffix.is_empty() || rule.suffix.starts_with('.') || rule.suffix.ends_with('.') {
            errors.push(ValidationError::BadSuffix(rule.suffix.clone()));
        }
        if rule.min_labels < 2 {
            errors.push(ValidationError::MinLabels {
                suffix: rule.suffix.clone(),
                min_labels: rule.min_labels,
            });
        }
    }

    if tenancy.base_hosts.is_empty() {
        errors.push(ValidationError::NoBaseHosts);
    }

    match url::Url::parse(&tenancy.default_url) {
        Ok(u) if matches!(u.scheme(), "http" | "https") && u.has_host() => {}
        _ => errors.push(ValidationError::BadDefaultUrl(tenancy.default_url.clone())),
    }

    if !is_valid_label(&tenancy.admin_label) {
        errors.push(ValidationError::BadAdminLabel(tenancy.admin_label.clone()));
    }

    for (field, value) in [
        ("tenancy.login_path", &tenancy.login_path),
        ("tenancy.admin_prefix", &tenancy.admin_prefix),
        ("tenancy.tenant_prefix", &tenancy.tenant_prefix),
    ] {
        if !value.starts_with('/') {
            errors.push(ValidationError::NotAbsolutePath { field, value: value.clone() });
        }
    }
    for (field, value) in [
        ("tenancy.admin_prefix", &tenancy.admin_prefix),
        ("tenancy.tenant_prefix", &tenancy.tenant_prefix),
    ] {
        if value.ends_with('/') {
            errors.push(ValidationError::TrailingSlash { field, value: value.clone() });
        }
    }

    let classifier = PathClassifier::new(&tenancy.exempt_paths, tenancy.exempt_match);
    if !classifier.is_exempt(&tenancy.login_path) {
        errors.push(ValidationError::LoginNotExempt(tenancy.login_path.clone()));
    }

    if config.auth.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if let VerifierConfig::Remote { url } = &config.auth.verifier {
        if url::Url::parse(url).is_err() {
            errors.push(ValidationError::BadVerifierUrl(url.clone()));
        }
    }

    if Authority::from_str(&config.renderer.address).is_err() {
        errors.push(ValidationError::BadAddress {
            field: "renderer.address",
            value: config.renderer.address.clone(),
        });
    }

    let mut addresses = vec![("listener.bind_address", &config.listener.bind_address)];
    if config.admin.enabled {
        addresses.push(("admin.bind_address", &config.admin.bind_address));
    }
    if config.observability.metrics_enabled {
        addresses.push(("observability.metrics_address", &config.observability.metrics_address));
    }
    for (field, value) in addresses {
        if value.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::BadAddress { field, value: value.clone() });
        }
    }

    if config.admin.enabled && config.admin.api_key == PLACEHOLDER_API_KEY {
        errors.push(ValidationError::PlaceholderApiKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
