//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, never overrides)
//!     → process environment
//!     → loader.rs (lookup & parse)
//!     → validation.rs (semantic checks)
//!     → CLI overrides (main.rs)
//!     → ProxyConfig (validated, immutable)
//!     → handed to HttpServer::new, shared read-only with every request
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup and never mutated afterwards
//! - Request handling never reads the process environment
//! - All fields have defaults to allow an empty environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_env_file, load_from_lookup, ConfigError};
pub use schema::{
    LimitsConfig, ListenerConfig, ObservabilityConfig, ProxyConfig, StaticPageConfig,
    UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
