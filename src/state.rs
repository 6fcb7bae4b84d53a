//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// State shared by all request handlers.
///
/// Cloning is cheap; the service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    /// Scheme and host prepended to names to form short URLs.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService<dyn LinkRepository>>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            link_service,
            base_url: base_url.into(),
        }
    }

    /// Full short URL for `name`.
    pub fn short_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
}
