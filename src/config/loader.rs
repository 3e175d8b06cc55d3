//! Configuration loading from the environment.
//!
//! Values come from a key lookup so the same code serves the real process
//! environment and the in-memory maps used by tests. A `.env` file, when
//! present, is merged into the process environment first without
//! overriding variables that are already set.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Server-side bearer token.
pub const ENV_API_KEY: &str = "OPENWEBUI_API_KEY";
/// Fallback upstream base URL.
pub const ENV_DEFAULT_URL: &str = "DEFAULT_OPENWEBUI_URL";
/// Listening port.
pub const ENV_PORT: &str = "SERVER_PORT";
/// Bind host.
pub const ENV_HOST: &str = "SERVER_HOST";
/// Path of the static chat page.
pub const ENV_PAGE: &str = "WEBCHAT_PAGE";
/// Upstream timeout in seconds.
pub const ENV_TIMEOUT: &str = "UPSTREAM_TIMEOUT_SECS";
/// Default log level.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load env file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },

    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Merge a `.env` file into the process environment.
///
/// With no explicit path the default `.env` lookup is used and a missing file
/// is not an error. An explicit path must exist. Returns the file that was
/// loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    match path {
        Some(path) => dotenvy::from_path(path)
            .map(|_| Some(path.to_path_buf()))
            .map_err(|source| ConfigError::EnvFile {
                path: path.display().to_string(),
                source,
            }),
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(source) => Err(ConfigError::EnvFile {
                path: ".env".to_string(),
                source,
            }),
        },
    }
}

/// Load and validate configuration from the process environment.
pub fn load_config() -> Result<ProxyConfig, ConfigError> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load and validate configuration from an arbitrary key lookup.
///
/// Empty values are treated as unset.
pub fn load_from_lookup<F>(lookup: F) -> Result<ProxyConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let mut config = ProxyConfig::default();

    config.upstream.api_key = get(ENV_API_KEY);
    config.upstream.default_url = get(ENV_DEFAULT_URL).map(|v| v.trim().to_string());

    if let Some(host) = get(ENV_HOST) {
        config.listener.host = host.trim().to_string();
    }
    if let Some(port) = get(ENV_PORT) {
        config.listener.port = parse_value(ENV_PORT, &port)?;
    }
    if let Some(page) = get(ENV_PAGE) {
        config.static_page.path = page.trim().into();
    }
    if let Some(timeout) = get(ENV_TIMEOUT) {
        config.upstream.timeout_secs = parse_value(ENV_TIMEOUT, &timeout)?;
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.observability.log_level = level.trim().to_string();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
