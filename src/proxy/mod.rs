//! Proxy forwarding subsystem.
//!
//! Turns a browser call on `/proxy/<sub-path>` into an authenticated call on
//! the upstream chat backend and relays the result.

pub mod credentials;
pub mod error;
pub mod forwarder;
pub mod headers;
pub mod target;

pub use credentials::{resolve_credentials, CredentialSource, Credentials};
pub use error::ProxyError;
pub use forwarder::Forwarder;
pub use target::{build_target_url, PROXY_PREFIX};
