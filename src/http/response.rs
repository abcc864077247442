//! Response decoration for cross-origin access.
//!
//! # Responsibilities
//! - Attach the permissive CORS header set to every proxied response
//! - Answer OPTIONS preflight locally, without an upstream call
//!
//! # Design Decisions
//! - The three header values are fixed literals: the proxy exists so a
//!   browser app on another local port can fetch CDN assets, so `*` is
//!   intentional
//! - Preflight answers 204 No Content

use axum::http::{header::HeaderName, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// `Access-Control-Allow-Origin` value.
pub const ALLOW_ORIGIN: &str = "*";

/// `Access-Control-Allow-Methods` value.
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// `Access-Control-Allow-Headers` value.
pub const ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

/// Insert the permissive CORS header set into a response header map.
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        HeaderName::from_static("access-control-allow-origin"),
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-methods"),
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-headers"),
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

/// Build the local answer to an OPTIONS preflight request.
pub fn preflight_response() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    apply_cors(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_set_has_exactly_three_headers() {
        let mut headers = HeaderMap::new();
        apply_cors(&mut headers);
        assert_eq!(headers.len(), 3);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
        assert_eq!(
            headers["access-control-allow-headers"],
            "Origin, X-Requested-With, Content-Type, Accept"
        );
    }

    #[test]
    fn preflight_is_204_with_cors() {
        let response = preflight_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().contains_key("access-control-allow-origin"));
    }
}
