//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a single dispatch handler
//! - Wire up middleware (request id, tracing, body limit)
//! - Keep cross-origin headers on bodies rejected by the size limit
//! - Dispatch by method and path to the static page or the forwarder
//! - Bind to the listener and shut down gracefully
//!
//! # Routes
//! ```text
//! OPTIONS  *                     → 200, CORS headers, empty body
//! GET      / | /webchat.html     → static page
//! GET/POST /proxy/*              → forwarder
//! other    known route           → 501
//! other    *                     → 404 "Not Found"
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    middleware::map_response,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response::{apply_cors, not_found, preflight, unsupported_method};
use crate::http::static_page::{is_page_route, StaticPage};
use crate::proxy::{Forwarder, ProxyError, PROXY_PREFIX};

/// Application state injected into handlers.
///
/// Everything here is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
    pub page: Arc<StaticPage>,
}

/// HTTP server for the webchat proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let state = AppState {
            forwarder: Arc::new(Forwarder::new(&config.upstream)?),
            page: Arc::new(StaticPage::new(config.static_page.path.clone())),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(dispatch))
            .route("/{*path}", any(dispatch))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes)),
            )
            .layer(map_response(cors_on_oversized_body))
    }

    /// The configured router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve connections until a shutdown signal arrives, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The body limit layer answers 413 before dispatch runs.
async fn cors_on_oversized_body(mut response: Response) -> Response {
    if response.status() == StatusCode::PAYLOAD_TOO_LARGE {
        apply_cors(response.headers_mut());
    }
    response
}

/// Route one request by method and path.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if method == Method::OPTIONS {
        return preflight();
    }

    let is_proxy = path.starts_with(PROXY_PREFIX);
    let is_page = is_page_route(&path);

    match method {
        Method::GET if is_page => state.page.serve().await,
        Method::GET | Method::POST if is_proxy => {
            tracing::debug!(
                request_id = %request.request_id(),
                method = %method,
                path = %path,
                "Proxy request received"
            );
            state.forwarder.handle(request).await
        }
        _ if is_proxy || is_page => {
            tracing::debug!(method = %method, path = %path, "Unsupported method");
            unsupported_method()
        }
        _ => {
            tracing::debug!(method = %method, path = %path, "Unknown path");
            not_found()
        }
    }
}
