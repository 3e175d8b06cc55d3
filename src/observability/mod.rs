//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → tower_http TraceLayer spans per request (with x-request-id)
//!
//! Consumers:
//!     → logging.rs (fmt subscriber on stdout, EnvFilter)
//! ```
//!
//! # Design Decisions
//! - Bearer tokens are never logged, only their source
//! - Request bodies are logged only at trace level, truncated

pub mod logging;

pub use logging::init_logging;
