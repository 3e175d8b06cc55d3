//! Response helpers shared by every route.
//!
//! # Responsibilities
//! - Add permissive cross-origin headers so the chat page can read replies
//! - Build the small fixed responses (preflight, not found, unsupported)

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

pub const ACCESS_CONTROL_ALLOW_ORIGIN: HeaderName = header::ACCESS_CONTROL_ALLOW_ORIGIN;
pub const ACCESS_CONTROL_ALLOW_METHODS: HeaderName = header::ACCESS_CONTROL_ALLOW_METHODS;
pub const ACCESS_CONTROL_ALLOW_HEADERS: HeaderName = header::ACCESS_CONTROL_ALLOW_HEADERS;

const ALLOWED_ORIGIN: &str = "*";
const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization, X-API-Key, X-OpenWebUI-URL";

/// Set the cross-origin headers, replacing any existing values.
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOWED_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
}

/// CORS preflight answer: 200, empty body.
pub fn preflight() -> Response {
    let mut response = Response::new(Body::empty());
    apply_cors(response.headers_mut());
    response
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

pub fn unsupported_method() -> Response {
    (StatusCode::NOT_IMPLEMENTED, "Unsupported method").into_response()
}
