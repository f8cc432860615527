//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use tenant_router::config::parse_config;
use tenant_router::config::schema::VerifierConfig;
use tenant_router::http::AppState;
use tenant_router::{HttpServer, RouterConfig, Shutdown};

pub const VALID_TOKEN: &str = "valid-token";

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// A renderer that answers every request with a JSON description of it.
pub async fn start_renderer() -> SocketAddr {
    let app = Router::new().fallback(|request: Request<Body>| async move {
        let headers = request.headers();
        Json(json!({
            "path": request.uri().path(),
            "query": request.uri().query(),
            "host": header_str(headers, "host"),
            "forwarded_host": header_str(headers, "x-forwarded-host"),
            "forwarded_proto": header_str(headers, "x-forwarded-proto"),
            "request_id": header_str(headers, "x-request-id"),
        }))
    });
    serve(app).await
}

/// A session endpoint accepting only [`VALID_TOKEN`]. Returns its URL.
pub async fn start_session_endpoint() -> String {
    let app = Router::new().route(
        "/api/session",
        get(|headers: HeaderMap| async move {
            let expected = format!("Bearer {}", VALID_TOKEN);
            match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
                Some(value) if value == expected => {
                    Json(json!({ "subject": "alice" })).into_response()
                }
                _ => StatusCode::UNAUTHORIZED.into_response(),
            }
        }),
    );
    let addr = serve(app).await;
    format!("http://{}/api/session", addr)
}

/// An address nothing listens on.
pub async fn dead_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// The example configuration pointed at test collaborators.
pub fn test_config(renderer: SocketAddr, session_url: &str) -> RouterConfig {
    let mut config = parse_config(include_str!("../../router.example.toml")).unwrap();
    config.renderer.address = renderer.to_string();
    config.auth.verifier = VerifierConfig::Remote {
        url: session_url.to_string(),
    };
    config.auth.timeout_ms = 1000;
    config
}

pub struct RunningRouter {
    pub addr: SocketAddr,
    pub state: AppState,
    pub shutdown: Shutdown,
}

/// Start the router on an ephemeral port.
pub async fn spawn_router(config: RouterConfig) -> RunningRouter {
    let server = HttpServer::new(config).unwrap();
    let state = server.state();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    RunningRouter {
        addr,
        state,
        shutdown,
    }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

pub async fn json_body(response: reqwest::Response) -> Value {
    response.json().await.unwrap()
}
