//! Configuration validation.
//!
//! Returns every problem found, not just the first. Runs before the config
//! is accepted into the system.

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("DEFAULT_OPENWEBUI_URL must be an absolute http(s) URL, got {0:?}")]
    DefaultUrl(String),

    #[error("UPSTREAM_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,

    #[error("SERVER_HOST must not be empty")]
    EmptyHost,

    #[error("max body size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(url) = &config.upstream.default_url {
        if !is_http_url(url) {
            errors.push(ValidationError::DefaultUrl(url.clone()));
        }
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}
