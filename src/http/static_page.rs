//! Static chat page.
//!
//! Serves one fixed HTML file on `/` and `/webchat.html`. The file is read
//! on every request so edits show up without a restart.

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::response::apply_cors;

/// Paths answered with the chat page.
pub const PAGE_ROUTES: &[&str] = &["/", "/webchat.html"];

/// True if `path` is one of the page routes.
pub fn is_page_route(path: &str) -> bool {
    PAGE_ROUTES.contains(&path)
}

/// Responder for the chat page.
#[derive(Debug, Clone)]
pub struct StaticPage {
    path: PathBuf,
}

impl StaticPage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the page and build the response; 404 if it is missing.
    pub async fn serve(&self) -> Response {
        match tokio::fs::read(&self.path).await {
            Ok(content) => {
                let mut response = Response::new(Body::from(content));
                response
                    .headers_mut()
                    .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
                apply_cors(response.headers_mut());
                response
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "Chat page not found");
                (StatusCode::NOT_FOUND, format!("{} not found", self.file_name())).into_response()
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Failed to read chat page");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to read {}: {}", self.file_name(), e),
                )
                    .into_response()
            }
        }
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
