//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! Every section has defaults so an empty environment yields a usable config.

use std::fmt;
use std::path::PathBuf;

/// Root configuration for the webchat proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Upstream chat-backend settings (token, default URL, timeout).
    pub upstream: UpstreamConfig,

    /// The single static page served on `/` and `/webchat.html`.
    pub static_page: StaticPageConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Host or IP to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to listen on.
    pub port: u16,
}

impl ListenerConfig {
    /// The `host:port` string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
        }
    }
}

/// Upstream service configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Server-side bearer token. When set, client-supplied keys are ignored.
    pub api_key: Option<String>,

    /// Fallback upstream base URL when a request carries no override header.
    pub default_url: Option<String>,

    /// Total timeout for one upstream exchange, in seconds.
    pub timeout_secs: u64,

    /// Honor `HTTP_PROXY` / `HTTPS_PROXY` for outbound calls.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_url: None,
            timeout_secs: 300,
            system_proxy: true,
        }
    }
}

// Keeps the token out of startup logs and panic messages.
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("default_url", &self.default_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("system_proxy", &self.system_proxy)
            .finish()
    }
}

/// Static page configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPageConfig {
    /// Path of the chat page, relative paths resolve against the working directory.
    pub path: PathBuf,
}

impl Default for StaticPageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("webchat.html"),
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 32 * 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
