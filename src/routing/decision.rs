//! Routing decisions handed to the serving layer.

use serde::Serialize;

/// The single outcome of routing one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "snake_case")]
pub enum RoutingDecision {
    /// Serve the request path unchanged.
    PassThrough,
    /// Serve an internal tenant-prefixed path.
    RewriteTo(String),
    /// Unrecognized host: send the client elsewhere.
    RedirectTo(String),
    /// Tenant request without a valid session.
    LoginRedirect(String),
}

impl RoutingDecision {
    /// Stable label used in logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            RoutingDecision::PassThrough => "pass_through",
            RoutingDecision::RewriteTo(_) => "rewrite",
            RoutingDecision::RedirectTo(_) => "redirect",
            RoutingDecision::LoginRedirect(_) => "login_redirect",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(RoutingDecision::RewriteTo("/admin/".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "decision": "rewrite_to", "target": "/admin/" }));

        let json = serde_json::to_value(RoutingDecision::PassThrough).unwrap();
        assert_eq!(json, serde_json::json!({ "decision": "pass_through" }));
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(RoutingDecision::PassThrough.outcome(), "pass_through");
        assert_eq!(RoutingDecision::LoginRedirect("/signin".into()).outcome(), "login_redirect");
    }
}
