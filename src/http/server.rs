//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all routing handler
//! - Wire up middleware (tracing, limits, request ID, timeout)
//! - Run the routing engine for every request
//! - Translate the decision: forward, rewrite-and-forward, or redirect
//! - Serve over plain TCP or TLS with graceful shutdown

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::{build_validator, VerifyError};
use crate::config::RouterConfig;
use crate::http::forward::{ForwardError, Forwarder};
use crate::http::request::{request_id, UuidRequestId};
use crate::http::response;
use crate::http::stats::DecisionStats;
use crate::lifecycle::shutdown;
use crate::net::tls::load_tls_config;
use crate::observability::metrics;
use crate::routing::{RequestDescriptor, RoutingDecision, RoutingEngine};

/// How long TLS connections may drain after shutdown is triggered.
const TLS_DRAIN_SECS: u64 = 10;

/// Errors that prevent the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("renderer setup failed: {0}")]
    Renderer(#[from] ForwardError),

    #[error("session verifier setup failed: {0}")]
    Verifier(#[from] VerifyError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RoutingEngine>,
    pub forwarder: Forwarder,
    pub stats: Arc<DecisionStats>,
    /// Scheme clients used to reach us, reported as X-Forwarded-Proto.
    pub scheme: &'static str,
}

/// HTTP server for the tenant router.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a server whose session verifier comes from the configuration.
    pub fn new(config: RouterConfig) -> Result<Self, ServerError> {
        let validator = build_validator(&config.auth)?;
        let engine = RoutingEngine::new(&config.tenancy, validator);
        Self::with_engine(config, engine)
    }

    /// Create a server around a prebuilt engine.
    pub fn with_engine(config: RouterConfig, engine: RoutingEngine) -> Result<Self, ServerError> {
        let forwarder = Forwarder::new(&config.renderer.address)?;

        let state = AppState {
            engine: Arc::new(engine),
            forwarder,
            stats: Arc::new(DecisionStats::default()),
            scheme: if config.listener.tls.is_some() { "https" } else { "http" },
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(route_handler))
            .route("/", any(route_handler))
            .with_state(state)
            .layer(ConcurrencyLimitLayer::new(config.listener.max_connections.max(1)))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The fully layered application, for embedding or in-process tests.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Shared state, also consumed by the admin API.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Run the server on a bound TCP listener until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server with TLS on `addr` until `shutdown` fires.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let Some(tls) = self.config.listener.tls.as_ref() else {
            return Err(ServerError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "listener.tls is not configured",
            )));
        };
        let rustls = load_tls_config(tls).await?;

        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            shutdown::wait(shutdown).await;
            drain.graceful_shutdown(Some(Duration::from_secs(TLS_DRAIN_SECS)));
        });

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::bind_rustls(addr, rustls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Main routing handler.
/// Asks the engine for a decision and carries it out.
async fn route_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let descriptor = RequestDescriptor::from_parts(&parts);
    let request_id = request_id(&parts.headers).to_string();

    let decision = state.engine.decide(&descriptor).await;
    state.stats.record(&decision);

    let response = match &decision {
        RoutingDecision::PassThrough => {
            let path = parts.uri.path().to_string();
            forward(&state, parts, body, &path, &descriptor.host, &request_id).await
        }
        RoutingDecision::RewriteTo(path) => {
            tracing::debug!(request_id = %request_id, from = %descriptor.path, to = %path, "Rewriting request");
            forward(&state, parts, body, path, &descriptor.host, &request_id).await
        }
        RoutingDecision::RedirectTo(url) => response::redirect(url),
        RoutingDecision::LoginRedirect(path) => response::redirect(path),
    };

    metrics::record_request(decision.outcome(), response.status().as_u16(), start_time);
    response
}

async fn forward(
    state: &AppState,
    parts: axum::http::request::Parts,
    body: Body,
    path: &str,
    host: &str,
    request_id: &str,
) -> Response {
    match state.forwarder.forward(parts, body, path, host, state.scheme).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!(request_id = %request_id, path = %path, error = %e, "Renderer error");
            metrics::record_upstream_error();
            state.stats.record_upstream_error();
            response::bad_gateway()
        }
    }
}
