//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (one task per connection)
//!     → request.rs (request id)
//!     → server.rs (dispatch by method and path)
//!         → static_page.rs (GET / and /webchat.html)
//!         → proxy::Forwarder (GET/POST /proxy/*)
//!     → response.rs (CORS headers, fixed replies)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod static_page;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
pub use static_page::StaticPage;
