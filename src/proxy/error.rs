//! Forwarding errors and their translation into HTTP responses.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::http::response::apply_cors;

/// Every way a single proxied request can fail.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid proxy path")]
    InvalidPath,

    #[error("Missing X-API-Key header or server-side OPENWEBUI_API_KEY environment variable")]
    MissingCredentials,

    #[error("Invalid API key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("Missing X-OpenWebUI-URL header or DEFAULT_OPENWEBUI_URL environment variable")]
    MissingTarget,

    /// The upstream answered, but with a non-2xx status.
    #[error("upstream returned {status}: {reason}")]
    Upstream { status: StatusCode, reason: String },

    /// DNS, connect, timeout or malformed-response failures.
    #[error("URL Error: {0}")]
    Transport(String),

    #[error("Request failed with error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Status code sent to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPath
            | Self::MissingCredentials
            | Self::InvalidKeyEncoding(_)
            | Self::MissingTarget => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => *status,
            Self::Transport(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for errors caused by the caller's request rather than the upstream.
    pub fn is_client_error(&self) -> bool {
        self.status() == StatusCode::BAD_REQUEST
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        // Builder errors mean we never reached the network (bad URL, bad header).
        if e.is_builder() {
            Self::Internal(e.to_string())
        } else {
            Self::Transport(describe_transport_error(&e))
        }
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// JSON body relayed when the upstream answers with an error status.
#[derive(Debug, Serialize)]
pub struct UpstreamErrorBody {
    pub error: UpstreamErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct UpstreamErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub code: u16,
}

impl UpstreamErrorBody {
    pub fn new(status: StatusCode, reason: impl Into<String>) -> Self {
        Self {
            error: UpstreamErrorDetail {
                message: reason.into(),
                kind: "http_error",
                code: status.as_u16(),
            },
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = match self {
            Self::Upstream { status, reason } => {
                (status, Json(UpstreamErrorBody::new(status, reason))).into_response()
            }
            other => {
                let mut response = (status, other.to_string()).into_response();
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                );
                response
            }
        };
        apply_cors(response.headers_mut());
        response
    }
}
