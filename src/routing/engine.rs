//! Routing decision engine.
//!
//! # State Machine
//! ```text
//! host ──▶ HostParser ──▶ no tenant ──▶ base host?  ── yes ──▶ PassThrough
//!                  │                              └── no  ──▶ RedirectTo(default_url)
//!                  ▼
//!               tenant ──▶ kind ──▶ exempt path? ── yes ──▶ RewriteTo(rewrite(kind, path))
//!                                        │
//!                                        no
//!                                        ▼
//!                                 TokenValidator ── session ──▶ RewriteTo(rewrite(kind, path))
//!                                        └────────── none ────▶ LoginRedirect(login_path)
//! ```
//!
//! # Design Decisions
//! - Stateless per request; configuration is read-only after construction
//! - The session check is the only await point and runs at most once
//! - No error outcome: every request ends in one of the four decisions

use std::collections::HashSet;
use std::time::Instant;

use crate::auth::validator::TokenValidator;
use crate::config::schema::TenancyConfig;
use crate::observability::metrics;
use crate::routing::decision::RoutingDecision;
use crate::routing::host::{normalize_host, HostParser};
use crate::routing::path::PathClassifier;
use crate::routing::request::RequestDescriptor;
use crate::routing::rewrite::RouteRewriter;
use crate::routing::tenant::TenantKind;

/// Turns request descriptors into routing decisions.
#[derive(Debug, Clone)]
pub struct RoutingEngine {
    hosts: HostParser,
    paths: PathClassifier,
    rewriter: RouteRewriter,
    validator: TokenValidator,
    base_hosts: HashSet<String>,
    default_url: String,
    login_path: String,
    admin_label: String,
}

impl RoutingEngine {
    pub fn new(config: &TenancyConfig, validator: TokenValidator) -> Self {
        Self {
            hosts: HostParser::new(&config.domains),
            paths: PathClassifier::new(&config.exempt_paths, config.exempt_match),
            rewriter: RouteRewriter::new(config.admin_prefix.clone(), config.tenant_prefix.clone()),
            validator,
            base_hosts: config.base_hosts.iter().map(|h| normalize_host(h)).collect(),
            default_url: config.default_url.clone(),
            login_path: config.login_path.clone(),
            admin_label: config.admin_label.clone(),
        }
    }

    /// True if `host` serves the root application.
    pub fn is_base_host(&self, host: &str) -> bool {
        self.base_hosts.contains(&normalize_host(host))
    }

    /// Route one request.
    pub async fn decide(&self, request: &RequestDescriptor) -> RoutingDecision {
        let start = Instant::now();
        let decision = self.evaluate(request).await;

        tracing::debug!(
            method = %request.method,
            host = %request.host,
            path = %request.path,
            outcome = decision.outcome(),
            "Routing decision"
        );
        metrics::record_decision(decision.outcome(), start);

        decision
    }

    async fn evaluate(&self, request: &RequestDescriptor) -> RoutingDecision {
        let Some(id) = self.hosts.extract_tenant(&request.host) else {
            if self.is_base_host(&request.host) {
                return RoutingDecision::PassThrough;
            }
            tracing::info!(host = %request.host, "Unrecognized host");
            return RoutingDecision::RedirectTo(self.default_url.clone());
        };

        let kind = TenantKind::classify(Some(id), &self.admin_label);

        if self.paths.is_exempt(&request.path) {
            return RoutingDecision::RewriteTo(self.rewriter.rewrite(&kind, &request.path));
        }

        match self.validator.resolve(&request.credentials).await {
            Some(_) => RoutingDecision::RewriteTo(self.rewriter.rewrite(&kind, &request.path)),
            None => RoutingDecision::LoginRedirect(self.login_path.clone()),
        }
    }
}
