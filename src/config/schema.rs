//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Placeholder admin key shipped in defaults. Validation refuses to start the
/// admin listener while it is still set.
pub const PLACEHOLDER_API_KEY: &str = "CHANGE_ME_IN_PRODUCTION";

/// Root configuration for the tenant router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Downstream renderer that serves rewritten paths.
    pub renderer: RendererConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Host classification, exemptions and rewrite prefixes.
    pub tenancy: TenancyConfig,

    /// Session verification settings.
    pub auth: AuthConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub admin: AdminConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,

    /// Maximum concurrently served requests (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
            max_connections: 10_000,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Downstream renderer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Renderer address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// A domain suffix the router recognizes tenants under.
///
/// Rules are evaluated in declaration order and the first suffix that matches
/// a host is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DomainRule {
    /// Domain suffix without a leading dot (e.g., "example.com").
    pub suffix: String,

    /// Minimum number of dot-separated labels a host needs to carry a tenant.
    pub min_labels: usize,

    /// Leading labels that never name a tenant under this suffix.
    #[serde(default)]
    pub banned_labels: Vec<String>,
}

impl DomainRule {
    pub fn new(suffix: impl Into<String>, min_labels: usize, banned: &[&str]) -> Self {
        Self {
            suffix: suffix.into(),
            min_labels,
            banned_labels: banned.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// How exemption entries are compared against a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExemptMatch {
    /// Entry may appear anywhere in the path.
    #[default]
    Substring,
    /// Path must start with the entry.
    Prefix,
}

/// Tenant classification and rewrite configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TenancyConfig {
    /// Ordered domain suffix rules.
    pub domains: Vec<DomainRule>,

    /// Hosts (port ignored) that serve the root application.
    pub base_hosts: Vec<String>,

    /// Where requests for unrecognized hosts are sent.
    pub default_url: String,

    /// Reserved tenant label that selects the admin area.
    pub admin_label: String,

    /// Path unauthenticated tenant requests are redirected to.
    pub login_path: String,

    /// Internal prefix for admin tenant paths.
    pub admin_prefix: String,

    /// Internal prefix for user tenant paths, followed by the tenant label.
    pub tenant_prefix: String,

    /// Paths that bypass session checks.
    pub exempt_paths: Vec<String>,

    pub exempt_match: ExemptMatch,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            domains: vec![
                DomainRule::new("localhost", 2, &["www"]),
                DomainRule::new("nip.io", 2, &["www", "127"]),
                DomainRule::new("sslip.io", 2, &["www", "127"]),
            ],
            base_hosts: vec!["localhost".to_string()],
            default_url: "http://localhost:8080".to_string(),
            admin_label: "admin".to_string(),
            login_path: "/signin".to_string(),
            admin_prefix: "/admin".to_string(),
            tenant_prefix: "/subdomain".to_string(),
            exempt_paths: [
                "/signin",
                "/signup",
                "/verify-email",
                "/reset-password",
                "/forgot-password",
                "/terms",
                "/privacy",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            exempt_match: ExemptMatch::Substring,
        }
    }
}

/// Session verification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Cookie carrying the session token.
    pub cookie_name: String,

    /// Deadline for a single verification call in milliseconds.
    pub timeout_ms: u64,

    pub verifier: VerifierConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_string(),
            timeout_ms: 2000,
            verifier: VerifierConfig::default(),
        }
    }
}

/// Which session verifier backs the router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerifierConfig {
    /// Ask an HTTP session endpoint.
    Remote {
        /// Endpoint receiving `Authorization: Bearer <token>`.
        url: String,
    },
    /// Fixed token table, token -> subject.
    Static {
        #[serde(default)]
        tokens: std::collections::HashMap<String, String>,
    },
}

impl Default for VerifierConfig {
    fn default() -> Self {
        VerifierConfig::Remote {
            url: "http://127.0.0.1:4000/api/session".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin API bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: PLACEHOLDER_API_KEY.to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}
