//! Request descriptors and the adapters that build them.
//!
//! The engine only ever sees a [`RequestDescriptor`]. Each runtime context
//! gathers `(host, path, credentials)` its own way:
//! - [`RequestDescriptor::from_parts`] for inbound HTTP requests
//! - [`RequestDescriptor::from_url`] for a full URL plus explicit credentials

use axum::http::{header, request::Parts, Method};

use crate::auth::credentials::Credentials;

/// Everything the engine needs to route one request.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Raw host as received, port included.
    pub host: String,
    /// Path without the query string.
    pub path: String,
    pub credentials: Credentials,
}

impl RequestDescriptor {
    pub fn new(
        method: Method,
        host: impl Into<String>,
        path: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            method,
            host: host.into(),
            path: path.into(),
            credentials,
        }
    }

    /// Describe an inbound HTTP request.
    ///
    /// The Host header wins; HTTP/2 requests without one fall back to the
    /// URI authority. A missing host is the empty string.
    pub fn from_parts(parts: &Parts) -> Self {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_default();

        Self {
            method: parts.method.clone(),
            host,
            path: parts.uri.path().to_string(),
            credentials: Credentials::from_headers(&parts.headers),
        }
    }

    /// Describe a request for an absolute URL.
    pub fn from_url(method: Method, url: &url::Url, credentials: Credentials) -> Self {
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };

        Self {
            method,
            host,
            path: url.path().to_string(),
            credentials,
        }
    }
}
