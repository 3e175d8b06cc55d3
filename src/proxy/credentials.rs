//! Bearer token resolution.
//!
//! Precedence, first match wins:
//! 1. the server-side token configured at startup
//! 2. the base64-encoded `X-API-Key` request header
//!
//! A client key sent alongside a configured server token is ignored, not
//! rejected.

use std::fmt;

use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::proxy::error::ProxyError;
use crate::proxy::headers::X_API_KEY;

/// Where the resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// `OPENWEBUI_API_KEY` on the server.
    Server,
    /// `X-API-Key` on the request.
    Client,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server => f.write_str("server"),
            Self::Client => f.write_str("client"),
        }
    }
}

/// A non-empty bearer token and its origin.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    source: CredentialSource,
}

impl Credentials {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// The `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve the bearer token for one request.
pub fn resolve_credentials(
    server_token: Option<&str>,
    headers: &HeaderMap,
) -> Result<Credentials, ProxyError> {
    if let Some(token) = server_token.filter(|t| !t.is_empty()) {
        return Ok(Credentials {
            token: token.to_string(),
            source: CredentialSource::Server,
        });
    }

    let encoded = match headers.get(X_API_KEY) {
        Some(value) if !value.is_empty() => value
            .to_str()
            .map_err(|e| ProxyError::InvalidKeyEncoding(e.to_string()))?,
        _ => return Err(ProxyError::MissingCredentials),
    };

    let token = decode_api_key(encoded)?;
    if token.is_empty() {
        return Err(ProxyError::MissingCredentials);
    }

    Ok(Credentials {
        token,
        source: CredentialSource::Client,
    })
}

/// Decode a base64 `X-API-Key` value into UTF-8 text.
pub fn decode_api_key(encoded: &str) -> Result<String, ProxyError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| ProxyError::InvalidKeyEncoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ProxyError::InvalidKeyEncoding(e.to_string()))
}
