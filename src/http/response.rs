//! Decision-to-response translation for the denial outcomes.
//!
//! # Design Decisions
//! - Redirects are 307 so the client repeats the original method
//! - Upstream failures map to 502 Bad Gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

/// Temporary redirect to `location` (absolute URL or path).
pub fn redirect(location: &str) -> Response {
    Redirect::temporary(location).into_response()
}

/// Renderer could not be reached or answered garbage.
pub fn bad_gateway() -> Response {
    (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn test_redirect() {
        let response = redirect("/signin");
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[LOCATION], "/signin");
    }

    #[test]
    fn test_bad_gateway() {
        assert_eq!(bad_gateway().status(), StatusCode::BAD_GATEWAY);
    }
}
