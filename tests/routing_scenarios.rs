//! Routing decisions for representative hosts, paths and session states.

use axum::http::Method;
use std::sync::Arc;
use std::time::Duration;

use tenant_router::auth::{Credentials, StaticVerifier, TokenValidator};
use tenant_router::config::parse_config;
use tenant_router::routing::{HostParser, RequestDescriptor, RoutingDecision, RoutingEngine};

const DEFAULT_URL: &str = "https://example.com";

fn engine() -> RoutingEngine {
    let config = parse_config(include_str!("../router.example.toml")).unwrap();
    let verifier = StaticVerifier::default().with_token("valid", "alice");
    let validator = TokenValidator::new(Arc::new(verifier), "session", Duration::from_millis(200));
    RoutingEngine::new(&config.tenancy, validator)
}

fn parser() -> HostParser {
    let config = parse_config(include_str!("../router.example.toml")).unwrap();
    HostParser::new(&config.tenancy.domains)
}

async fn decide(host: &str, path: &str, token: Option<&str>) -> RoutingDecision {
    let credentials = token.map_or_else(Credentials::none, |t| Credentials::with_cookie("session", t));
    engine()
        .decide(&RequestDescriptor::new(Method::GET, host, path, credentials))
        .await
}

#[test]
fn test_host_extraction() {
    let parser = parser();
    let tenant = |host: &str| parser.extract_tenant(host).map(|t| t.to_string());

    assert_eq!(tenant("foo.example.com").as_deref(), Some("foo"));
    assert_eq!(tenant("www.example.com"), None);
    assert_eq!(tenant("foo.localhost:9999").as_deref(), Some("foo"));
    assert_eq!(tenant("localhost:9999"), None);
    assert_eq!(tenant("127.0.0.1.nip.io"), None);
    assert_eq!(tenant("foo.nip.io").as_deref(), Some("foo"));
}

#[tokio::test]
async fn test_tenant_with_session_is_rewritten() {
    assert_eq!(
        decide("acme.example.com", "/dashboard", Some("valid")).await,
        RoutingDecision::RewriteTo("/subdomain/acme/dashboard".into())
    );
}

#[tokio::test]
async fn test_tenant_without_session_goes_to_login() {
    assert_eq!(
        decide("acme.example.com", "/dashboard", None).await,
        RoutingDecision::LoginRedirect("/signin".into())
    );
}

#[tokio::test]
async fn test_admin_tenant_root() {
    assert_eq!(
        decide("admin.example.com", "/", Some("valid")).await,
        RoutingDecision::RewriteTo("/admin/".into())
    );
}

#[tokio::test]
async fn test_base_host_passes_through() {
    assert_eq!(
        decide("example.com", "/browse", None).await,
        RoutingDecision::PassThrough
    );
}

#[tokio::test]
async fn test_exempt_path_bypasses_session() {
    assert_eq!(
        decide("acme.example.com", "/reset-password", None).await,
        RoutingDecision::RewriteTo("/subdomain/acme/reset-password".into())
    );
}

#[tokio::test]
async fn test_unrecognized_host_redirects() {
    assert_eq!(
        decide("evil.test", "/", None).await,
        RoutingDecision::RedirectTo(DEFAULT_URL.into())
    );
}

#[tokio::test]
async fn test_exempt_paths_never_hit_login() {
    for token in [None, Some("valid"), Some("forged")] {
        for path in ["/reset-password", "/account/reset-password", "/signin"] {
            let decision = decide("acme.example.com", path, token).await;
            assert!(
                matches!(decision, RoutingDecision::RewriteTo(_)),
                "{} with {:?} gave {:?}",
                path,
                token,
                decision
            );
        }
    }
}

#[tokio::test]
async fn test_admin_is_never_a_user_tenant() {
    for path in ["/", "/users", "/signin"] {
        match decide("admin.example.com", path, Some("valid")).await {
            RoutingDecision::RewriteTo(target) => {
                assert!(target.starts_with("/admin"));
                assert!(!target.starts_with("/subdomain/admin"));
            }
            other => panic!("unexpected decision {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_local_development_hosts() {
    assert_eq!(
        decide("acme.localhost:3000", "/dashboard", Some("valid")).await,
        RoutingDecision::RewriteTo("/subdomain/acme/dashboard".into())
    );
    assert_eq!(
        decide("localhost:3000", "/dashboard", None).await,
        RoutingDecision::PassThrough
    );
    assert_eq!(
        decide("127.0.0.1.nip.io", "/", None).await,
        RoutingDecision::RedirectTo(DEFAULT_URL.into())
    );
}

#[tokio::test]
async fn test_decisions_are_repeatable() {
    let engine = engine();
    let cases = [
        ("acme.example.com", "/dashboard", Some("valid")),
        ("acme.example.com", "/dashboard", None),
        ("admin.example.com", "/", Some("valid")),
        ("example.com", "/browse", None),
        ("evil.test", "/", None),
        ("", "/", None),
    ];

    for (host, path, token) in cases {
        let request = |t: Option<&str>| {
            let creds = t.map_or_else(Credentials::none, |t| Credentials::with_cookie("session", t));
            RequestDescriptor::new(Method::GET, host, path, creds)
        };
        let first = engine.decide(&request(token)).await;
        let second = engine.decide(&request(token)).await;
        assert_eq!(first, second, "host {:?} path {:?}", host, path);
    }
}
