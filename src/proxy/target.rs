//! Upstream URL resolution and rewriting.
//!
//! # Responsibilities
//! - Strip the `/proxy/` prefix to get the upstream sub-path
//! - Pick the base URL: request header first, then the server default
//! - Join base and sub-path with exactly one slash
//! - Mount chat completions under `/api/v1/`
//!
//! # Design Decisions
//! - Only one trailing slash of the base and one leading slash of the
//!   sub-path are trimmed
//! - The query string rides along with the sub-path untouched

use axum::http::HeaderMap;

use crate::proxy::error::ProxyError;
use crate::proxy::headers::{header_text, X_OPENWEBUI_URL};

/// Reserved path prefix for forwarded calls.
pub const PROXY_PREFIX: &str = "/proxy/";

/// Sub-path suffix of the chat-completion endpoint.
pub const CHAT_COMPLETIONS_SUFFIX: &str = "chat/completions";

/// Versioned root the chat-completion endpoint is mounted under.
pub const CHAT_API_ROOT: &str = "api/v1";

/// Strip the proxy prefix from a request path (query string included).
pub fn extract_sub_path(path_and_query: &str) -> Result<&str, ProxyError> {
    path_and_query
        .strip_prefix(PROXY_PREFIX)
        .ok_or(ProxyError::InvalidPath)
}

/// Pick the upstream base URL for one request.
pub fn resolve_base_url<'a>(
    headers: &'a HeaderMap,
    default_url: Option<&'a str>,
) -> Result<&'a str, ProxyError> {
    header_text(headers, X_OPENWEBUI_URL)
        .or_else(|| default_url.map(str::trim).filter(|u| !u.is_empty()))
        .ok_or(ProxyError::MissingTarget)
}

/// True if the sub-path addresses the chat-completion endpoint.
///
/// The check runs on the raw sub-path, so a query string defeats it.
pub fn is_chat_completion(sub_path: &str) -> bool {
    sub_path.ends_with(CHAT_COMPLETIONS_SUFFIX)
}

/// Join a base URL and sub-path into the final upstream URL.
pub fn build_target_url(base_url: &str, sub_path: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let sub = sub_path.strip_prefix('/').unwrap_or(sub_path);

    if is_chat_completion(sub) {
        format!("{}/{}/{}", base, CHAT_API_ROOT, sub)
    } else {
        format!("{}/{}", base, sub)
    }
}
