//! Command-line arguments.
//!
//! Flags override values from the environment and `.env` file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{validate_config, ConfigError, ProxyConfig};

#[derive(Debug, Parser)]
#[command(name = "webchat-proxy")]
#[command(about = "Serves the webchat page and proxies its API calls to an OpenWebUI backend", long_about = None)]
pub struct Cli {
    /// Bind host (overrides SERVER_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Listening port (overrides SERVER_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Load environment variables from this file instead of ./.env
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Path of the chat page (overrides WEBCHAT_PAGE)
    #[arg(long)]
    pub page: Option<PathBuf>,

    /// Log level or filter directive (overrides LOG_LEVEL)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Apply flag overrides on top of `config` and re-validate.
    pub fn apply(&self, mut config: ProxyConfig) -> Result<ProxyConfig, ConfigError> {
        if let Some(host) = &self.host {
            config.listener.host = host.clone();
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(page) = &self.page {
            config.static_page.path = page.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
