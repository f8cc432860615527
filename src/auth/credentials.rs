//! The opaque credential container carried by a request.

use axum::http::{header, HeaderMap};

/// Raw credential-bearing header values of one request.
///
/// Nothing here is trusted or decoded beyond locating the token string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    cookie: Option<String>,
    authorization: Option<String>,
}

impl Credentials {
    /// An empty container.
    pub fn none() -> Self {
        Self::default()
    }

    /// Collect credential headers. Non-UTF-8 values are dropped.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let cookie = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            cookie: (!cookie.is_empty()).then_some(cookie),
            authorization: headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        }
    }

    /// A container holding only a session cookie.
    pub fn with_cookie(name: &str, value: &str) -> Self {
        Self {
            cookie: Some(format!("{}={}", name, value)),
            authorization: None,
        }
    }

    /// A container holding only a bearer token.
    pub fn with_bearer(token: &str) -> Self {
        Self {
            cookie: None,
            authorization: Some(format!("Bearer {}", token)),
        }
    }

    /// Value of cookie `name`, if present and non-empty.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookie
            .as_deref()?
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.trim().trim_matches('"'))
            .filter(|v| !v.is_empty())
    }

    /// Token of an `Authorization: Bearer` header.
    pub fn bearer(&self) -> Option<&str> {
        let value = self.authorization.as_deref()?;
        let (scheme, token) = value.split_once(' ')?;
        let token = token.trim();
        (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
    }

    /// The session token: cookie first, then bearer header.
    pub fn token(&self, cookie_name: &str) -> Option<&str> {
        self.cookie(cookie_name).or_else(|| self.bearer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; session=abc123"));
        let creds = Credentials::from_headers(&headers);

        assert_eq!(creds.cookie("session"), Some("abc123"));
        assert_eq!(creds.cookie("theme"), Some("dark"));
        assert_eq!(creds.cookie("missing"), None);
    }

    #[test]
    fn test_multiple_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("session=xyz"));
        let creds = Credentials::from_headers(&headers);

        assert_eq!(creds.cookie("session"), Some("xyz"));
    }

    #[test]
    fn test_bearer() {
        assert_eq!(Credentials::with_bearer("tok").bearer(), Some("tok"));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(Credentials::from_headers(&headers).bearer(), None);
    }

    #[test]
    fn test_token_prefers_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session=from-cookie"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        let creds = Credentials::from_headers(&headers);

        assert_eq!(creds.token("session"), Some("from-cookie"));
        assert_eq!(creds.token("other"), Some("from-header"));
    }

    #[test]
    fn test_empty_values_are_absent() {
        let creds = Credentials::with_cookie("session", "");
        assert_eq!(creds.token("session"), None);
        assert_eq!(Credentials::none().token("session"), None);
    }
}
