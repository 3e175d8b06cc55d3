//! Webchat proxy.
//!
//! A local HTTP intermediary that serves the chat page and forwards the
//! page's API calls to an OpenWebUI-compatible backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────┐
//!                     │                 WEBCHAT PROXY                  │
//!                     │                                                │
//!   Browser request   │  ┌────────┐    ┌──────────┐    ┌────────────┐  │
//!   ──────────────────┼─▶│  http  │───▶│ dispatch │───▶│static_page │  │
//!                     │  │ server │    │          │    └────────────┘  │
//!                     │  └────────┘    │          │    ┌────────────┐  │   Upstream
//!                     │                │          │───▶│   proxy    │──┼──▶ chat
//!                     │                └──────────┘    │ forwarder  │◀─┼─── backend
//!                     │                                └────────────┘  │
//!                     │  ┌──────────────────────────────────────────┐  │
//!                     │  │ config · observability · lifecycle       │  │
//!                     │  └──────────────────────────────────────────┘  │
//!                     └────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use webchat_proxy::cli::Cli;
use webchat_proxy::config::{load_config, load_env_file};
use webchat_proxy::lifecycle::{spawn_signal_handler, Shutdown};
use webchat_proxy::observability::init_logging;
use webchat_proxy::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Explicit environment wins over the .env file.
    let env_file = load_env_file(cli.env_file.as_deref())?;
    let config = cli.apply(load_config()?)?;

    init_logging(&config.observability)?;

    if let Some(path) = env_file {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    tracing::info!("webchat-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        page = %config.static_page.path.display(),
        server_api_key = config.upstream.api_key.is_some(),
        default_url = config.upstream.default_url.as_deref().unwrap_or("<none>"),
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections, press Ctrl+C to stop"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_handler(shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
