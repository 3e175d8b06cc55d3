//! Upstream forwarding.
//!
//! # Data Flow
//! ```text
//! /proxy/<sub-path> request
//!     → target.rs (strip prefix)
//!     → credentials.rs (server token, else X-API-Key)
//!     → target.rs (base URL, join, chat-completion remount)
//!     → headers.rs (fixed outbound header set)
//!     → reqwest (single attempt, fixed timeout)
//!     → relay: status + filtered headers + raw body, or a ProxyError
//! ```
//!
//! Exactly one upstream attempt is made per client request. There is no
//! retry, backoff or fallback routing; the outcome goes straight back to the
//! caller.

use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    http::{header::CONTENT_LENGTH, Method, Request},
    response::{IntoResponse, Response},
};

use crate::config::UpstreamConfig;
use crate::http::response::apply_cors;
use crate::proxy::credentials::resolve_credentials;
use crate::proxy::error::ProxyError;
use crate::proxy::headers::{filter_response_headers, outbound_headers};
use crate::proxy::target::{build_target_url, extract_sub_path, resolve_base_url};

const BODY_PREVIEW_CHARS: usize = 500;

/// Forwards `/proxy/*` requests to the upstream chat backend.
#[derive(Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    api_key: Option<String>,
    default_url: Option<String>,
}

impl Forwarder {
    /// Build the forwarder and its HTTP client from startup configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ProxyError> {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            default_url: config.default_url.clone(),
        })
    }

    /// Handle one request, converting every failure into a response.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let method = request.method().clone();
        let path = request.uri().path().to_string();

        match self.forward(request).await {
            Ok(response) => {
                tracing::info!(
                    method = %method,
                    path = %path,
                    status = response.status().as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Proxy request completed"
                );
                response
            }
            Err(e) => {
                match &e {
                    ProxyError::Upstream { status, .. } => tracing::warn!(
                        method = %method,
                        path = %path,
                        status = status.as_u16(),
                        "Upstream returned an error status"
                    ),
                    e if e.is_client_error() => tracing::warn!(
                        method = %method,
                        path = %path,
                        error = %e,
                        "Rejected proxy request"
                    ),
                    e => tracing::error!(
                        method = %method,
                        path = %path,
                        error = %e,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Proxy request failed"
                    ),
                }
                e.into_response()
            }
        }
    }

    /// Forward one request upstream and relay the answer.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, ProxyError> {
        let (parts, body) = request.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| parts.uri.path());
        let sub_path = extract_sub_path(path_and_query)?;

        let credentials = resolve_credentials(self.api_key.as_deref(), &parts.headers)?;
        let base_url = resolve_base_url(&parts.headers, self.default_url.as_deref())?;
        let target_url = build_target_url(base_url, sub_path);
        let headers = outbound_headers(&credentials)?;

        tracing::debug!(
            method = %parts.method,
            target = %target_url,
            credentials = %credentials.source(),
            "Forwarding request"
        );

        let mut outbound = self
            .client
            .request(parts.method.clone(), &target_url)
            .headers(headers);

        if parts.method == Method::POST {
            let payload = read_body(body).await?;
            tracing::trace!(
                bytes = payload.len(),
                preview = %body_preview(&payload),
                "Request body"
            );
            // An empty POST still announces its length.
            outbound = outbound.header(CONTENT_LENGTH, payload.len()).body(payload);
        }

        let upstream = outbound.send().await?;
        let status = upstream.status();

        if !status.is_success() {
            return Err(ProxyError::Upstream {
                status,
                reason: upstream_reason(&upstream),
            });
        }

        let headers = filter_response_headers(upstream.headers());
        let payload = upstream.bytes().await?;

        tracing::debug!(
            target = %target_url,
            status = status.as_u16(),
            bytes = payload.len(),
            "Upstream responded"
        );

        let mut response = Response::new(Body::from(payload));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        apply_cors(response.headers_mut());
        Ok(response)
    }
}

/// The status line's reason phrase as sent by the upstream.
///
/// hyper keeps only non-canonical phrases; a canonical one is restored from
/// the status code.
fn upstream_reason(upstream: &reqwest::Response) -> String {
    match upstream.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => upstream
            .status()
            .canonical_reason()
            .unwrap_or("Unknown Status")
            .to_string(),
    }
}

async fn read_body(body: Body) -> Result<Bytes, ProxyError> {
    // The size cap is enforced by the body limit layer in front of the handler.
    axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| ProxyError::Internal(format!("failed to read request body: {}", e)))
}

fn body_preview(payload: &[u8]) -> String {
    String::from_utf8_lossy(payload)
        .chars()
        .take(BODY_PREVIEW_CHARS)
        .collect()
}
