//! Forwarding to the downstream renderer.
//!
//! # Responsibilities
//! - Point the request at the renderer with the decided path
//! - Keep the original query string and Host header
//! - Strip hop-by-hop headers both ways, set X-Forwarded-*
//!
//! # Design Decisions
//! - Single attempt; the router never retries
//! - Response bodies are streamed, not buffered

use axum::{
    body::Body,
    http::{
        request::Parts,
        uri::{Authority, PathAndQuery, Scheme},
        Request, Response, Uri,
    },
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::str::FromStr;
use thiserror::Error;

use crate::security::headers::{apply_forwarded_headers, strip_hop_by_hop};

/// Error type for forwarding.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("invalid renderer address '{0}'")]
    InvalidAddress(String),

    #[error("invalid forwarded path: {0}")]
    InvalidPath(#[from] axum::http::uri::InvalidUri),

    #[error("invalid forwarded request: {0}")]
    InvalidRequest(#[from] axum::http::Error),

    #[error("renderer request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

/// HTTP client bound to the renderer.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    authority: Authority,
}

impl Forwarder {
    pub fn new(address: &str) -> Result<Self, ForwardError> {
        let authority = Authority::from_str(address)
            .map_err(|_| ForwardError::InvalidAddress(address.to_string()))?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self { client, authority })
    }

    /// Renderer URI for `path`, keeping the query of `original`.
    pub fn target_uri(&self, original: &Uri, path: &str) -> Result<Uri, ForwardError> {
        let path_and_query = match original.query() {
            Some(query) => format!("{}?{}", path, query),
            None => path.to_string(),
        };

        let uri = Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(PathAndQuery::try_from(path_and_query)?)
            .build()?;
        Ok(uri)
    }

    /// Send the request to the renderer under `path`.
    pub async fn forward(
        &self,
        parts: Parts,
        body: Body,
        path: &str,
        public_host: &str,
        scheme: &'static str,
    ) -> Result<Response<Body>, ForwardError> {
        let uri = self.target_uri(&parts.uri, path)?;

        let mut headers = parts.headers;
        strip_hop_by_hop(&mut headers);
        apply_forwarded_headers(&mut headers, public_host, scheme);

        let mut request = Request::builder()
            .method(parts.method)
            .uri(uri)
            .body(body)?;
        *request.headers_mut() = headers;

        let response: Response<Incoming> = self.client.request(request).await?;

        let (mut parts, body) = response.into_parts();
        strip_hop_by_hop(&mut parts.headers);
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder")
            .field("authority", &self.authority)
            .finish()
    }
}
