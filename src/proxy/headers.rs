//! Header names and header-set transformations for the forwarder.
//!
//! Inbound headers are never copied upstream; the outbound set is fixed.
//! Upstream response headers are copied back minus the hop-by-hop denylist.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::proxy::credentials::Credentials;
use crate::proxy::error::ProxyError;

/// Per-request upstream base URL override.
pub const X_OPENWEBUI_URL: &str = "x-openwebui-url";
/// Base64-encoded bearer token supplied by the browser.
pub const X_API_KEY: &str = "x-api-key";

/// Browser-like agent string; some upstreams filter non-browser agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Upstream response headers that must not cross the proxy boundary.
pub const HOP_BY_HOP_DENYLIST: &[&str] = &["connection", "transfer-encoding"];

/// True if `name` is on the hop-by-hop denylist, compared case-insensitively.
pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_DENYLIST
        .iter()
        .any(|h| name.eq_ignore_ascii_case(h))
}

/// Copy `headers`, dropping hop-by-hop entries. Repeated values are preserved.
pub fn filter_response_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if !is_hop_by_hop(name.as_str()) {
            filtered.append(name.clone(), value.clone());
        }
    }
    filtered
}

/// The exact header set sent upstream.
pub fn outbound_headers(credentials: &Credentials) -> Result<HeaderMap, ProxyError> {
    let authorization = HeaderValue::from_str(&credentials.bearer()).map_err(|_| {
        ProxyError::Internal("API key contains characters not allowed in a header".into())
    })?;

    let mut headers = HeaderMap::with_capacity(3);
    headers.insert(header::AUTHORIZATION, authorization);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(BROWSER_USER_AGENT),
    );
    Ok(headers)
}

/// Read a header as non-empty trimmed text.
pub fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
