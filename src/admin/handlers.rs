use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::admin::AdminState;
use crate::auth::Credentials;
use crate::http::StatsSnapshot;
use crate::routing::{RequestDescriptor, RoutingDecision};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

/// Body of a dry-run routing request.
#[derive(Debug, Deserialize)]
pub struct DecideRequest {
    pub url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DecideResponse {
    pub host: String,
    pub path: String,
    #[serde(flatten)]
    pub decision: RoutingDecision,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn get_stats(State(state): State<AdminState>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}

/// Run the engine for a URL without forwarding anything.
pub async fn post_decide(
    State(state): State<AdminState>,
    Json(request): Json<DecideRequest>,
) -> Response {
    let url: url::Url = match request.url.parse() {
        Ok(u) => u,
        Err(_) => return (StatusCode::BAD_REQUEST, "Invalid url").into_response(),
    };

    let method = match request.method.as_deref().map(str::parse::<Method>) {
        None => Method::GET,
        Some(Ok(m)) => m,
        Some(Err(_)) => return (StatusCode::BAD_REQUEST, "Invalid method").into_response(),
    };

    let credentials = request
        .token
        .as_deref()
        .map_or_else(Credentials::none, Credentials::with_bearer);

    let descriptor = RequestDescriptor::from_url(method, &url, credentials);
    let decision = state.engine.decide(&descriptor).await;

    Json(DecideResponse {
        host: descriptor.host,
        path: descriptor.path,
        decision,
    })
    .into_response()
}
