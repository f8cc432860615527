//! In-process decision counters exposed through the admin API.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::routing::RoutingDecision;

/// Running totals since process start.
#[derive(Debug, Default)]
pub struct DecisionStats {
    pass_through: AtomicU64,
    rewrite: AtomicU64,
    redirect: AtomicU64,
    login_redirect: AtomicU64,
    upstream_errors: AtomicU64,
}

/// Point-in-time copy of [`DecisionStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub pass_through: u64,
    pub rewrite: u64,
    pub redirect: u64,
    pub login_redirect: u64,
    pub upstream_errors: u64,
}

impl DecisionStats {
    pub fn record(&self, decision: &RoutingDecision) {
        let counter = match decision {
            RoutingDecision::PassThrough => &self.pass_through,
            RoutingDecision::RewriteTo(_) => &self.rewrite,
            RoutingDecision::RedirectTo(_) => &self.redirect,
            RoutingDecision::LoginRedirect(_) => &self.login_redirect,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_error(&self) {
        self.upstream_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pass_through: self.pass_through.load(Ordering::Relaxed),
            rewrite: self.rewrite.load(Ordering::Relaxed),
            redirect: self.redirect.load(Ordering::Relaxed),
            login_redirect: self.login_redirect.load(Ordering::Relaxed),
            upstream_errors: self.upstream_errors.load(Ordering::Relaxed),
        }
    }
}
