//! Application state shared across handlers.

use std::sync::Arc;

use crate::cms::{ContentClient, ContentError};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: configuration and the content API client. It is
/// read-only after startup; requests never mutate shared state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    content: ContentClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the content API client fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self, ContentError> {
        let content = ContentClient::new(&config.content)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, content }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the content API client.
    #[must_use]
    pub fn content(&self) -> &ContentClient {
        &self.inner.content
    }
}
