//! Admin API.
//!
//! Runs on its own listener, never on the public one, and every route is
//! behind bearer authentication.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::{AppState, DecisionStats};
use crate::lifecycle::shutdown;
use crate::routing::RoutingEngine;

/// State shared by admin handlers.
#[derive(Clone)]
pub struct AdminState {
    pub engine: Arc<RoutingEngine>,
    pub stats: Arc<DecisionStats>,
    pub api_key: Arc<str>,
}

impl AdminState {
    /// Share the public server's engine and counters.
    pub fn new(app: &AppState, api_key: &str) -> Self {
        Self {
            engine: app.engine.clone(),
            stats: app.stats.clone(),
            api_key: Arc::from(api_key),
        }
    }
}

pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/stats", get(get_stats))
        .route("/admin/decide", post(post_decide))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
}

/// Serve the admin API until `shutdown` fires.
pub async fn run_admin(
    listener: TcpListener,
    state: AdminState,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    tracing::info!(address = %listener.local_addr()?, "Admin API starting");

    axum::serve(listener, setup_admin_router(state))
        .with_graceful_shutdown(shutdown::wait(shutdown))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{StaticVerifier, TokenValidator};
    use crate::config::schema::{DomainRule, TenancyConfig};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    fn state() -> AdminState {
        let tenancy = TenancyConfig {
            domains: vec![DomainRule::new("example.com", 3, &["www"])],
            base_hosts: vec!["example.com".into()],
            default_url: "https://example.com".into(),
            ..TenancyConfig::default()
        };
        let validator = TokenValidator::new(
            Arc::new(StaticVerifier::default().with_token("good", "alice")),
            "session",
            Duration::from_millis(100),
        );
        AdminState {
            engine: Arc::new(RoutingEngine::new(&tenancy, validator)),
            stats: Arc::new(DecisionStats::default()),
            api_key: Arc::from("s3cret"),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_requires_api_key() {
        let app = setup_admin_router(state());

        let response = app
            .clone()
            .oneshot(Request::get("/admin/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(
                Request::get("/admin/status")
                    .header(header::AUTHORIZATION, "Bearer wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_status() {
        let response = setup_admin_router(state())
            .oneshot(
                Request::get("/admin/status")
                    .header(header::AUTHORIZATION, "Bearer s3cret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "operational");
    }

    #[tokio::test]
    async fn test_decide_dry_run() {
        let state = state();
        let app = setup_admin_router(state.clone());

        let response = app
            .oneshot(
                Request::post("/admin/decide")
                    .header(header::AUTHORIZATION, "Bearer s3cret")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"url":"https://acme.example.com/dashboard","token":"good"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["host"], "acme.example.com");
        assert_eq!(json["decision"], "rewrite_to");
        assert_eq!(json["target"], "/subdomain/acme/dashboard");

        // Dry runs do not count as traffic.
        assert_eq!(state.stats.snapshot().rewrite, 0);
    }

    #[tokio::test]
    async fn test_decide_rejects_bad_url() {
        let response = setup_admin_router(state())
            .oneshot(
                Request::post("/admin/decide")
                    .header(header::AUTHORIZATION, "Bearer s3cret")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"url":"not a url"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
