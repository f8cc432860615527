//! Host parsing and tenant extraction.
//!
//! # Responsibilities
//! - Strip a trailing `:port` from the Host header
//! - Match the host against ordered domain suffix rules
//! - Extract the leading label as the tenant identifier
//!
//! # Design Decisions
//! - Pure function of the host string: no path, method or clock input
//! - Host matching is case-insensitive (RFC 9110)
//! - First matching suffix is authoritative; a banned label under that suffix
//!   yields no tenant and lower-priority rules are not consulted
//! - "www" is never a tenant, whatever the rule's own ban list says
//! - "No tenant" does not say whether the host was recognized; the engine
//!   checks base hosts separately

use crate::config::schema::DomainRule;
use crate::routing::tenant::TenantIdentifier;

/// Label rejected under every suffix in addition to each rule's ban list.
pub const RESERVED_LABEL: &str = "www";

/// Lowercase a Host header value and drop its port.
pub fn normalize_host(host: &str) -> String {
    strip_port(host.trim()).to_ascii_lowercase()
}

fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port))
            if !port.is_empty()
                && port.bytes().all(|b| b.is_ascii_digit())
                && (!name.contains(':') || name.ends_with(']')) =>
        {
            name
        }
        _ => host,
    }
}

/// A compiled domain rule.
#[derive(Debug, Clone)]
struct SuffixRule {
    suffix: String,
    dotted: String,
    min_labels: usize,
    banned: Vec<String>,
}

impl SuffixRule {
    fn matches(&self, host: &str) -> bool {
        host == self.suffix || host.ends_with(&self.dotted)
    }
}

/// Extracts tenant identifiers from hosts.
///
/// Immutable after construction (thread-safe without locks).
#[derive(Debug, Clone)]
pub struct HostParser {
    rules: Vec<SuffixRule>,
}

impl HostParser {
    /// Compile the rules, preserving their order.
    pub fn new(rules: &[DomainRule]) -> Self {
        let rules = rules
            .iter()
            .map(|r| {
                let suffix = r.suffix.trim_matches('.').to_ascii_lowercase();
                let mut banned: Vec<String> =
                    r.banned_labels.iter().map(|l| l.to_ascii_lowercase()).collect();
                if !banned.iter().any(|l| l == RESERVED_LABEL) {
                    banned.push(RESERVED_LABEL.to_string());
                }
                SuffixRule {
                    dotted: format!(".{}", suffix),
                    suffix,
                    min_labels: r.min_labels,
                    banned,
                }
            })
            .collect();
        Self { rules }
    }

    /// Extract the tenant identifier carried by `host`, if any.
    pub fn extract_tenant(&self, host: &str) -> Option<TenantIdentifier> {
        let host = normalize_host(host);

        let rule = self.rules.iter().find(|r| r.matches(&host))?;
        if host == rule.suffix {
            return None;
        }

        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() < rule.min_labels {
            return None;
        }

        let leading = labels[0];
        if rule.banned.iter().any(|b| b == leading) {
            tracing::trace!(host = %host, label = leading, suffix = %rule.suffix, "Banned tenant label");
            return None;
        }

        TenantIdentifier::parse(leading)
    }
}
