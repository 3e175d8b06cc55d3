//! Webchat proxy library.
//!
//! Serves the chat page and forwards browser API calls to an upstream chat
//! backend, injecting the bearer token and cross-origin headers.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::{Forwarder, ProxyError};
