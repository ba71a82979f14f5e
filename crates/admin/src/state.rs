//! Application state shared across admin handlers.

use std::sync::Arc;

use pawcart_client::ApiClient;

use crate::config::AdminConfig;
use crate::services::BadgeCounters;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: ApiClient,
    badges: BadgeCounters,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend base URL is not a valid URL.
    pub fn new(config: AdminConfig) -> Result<Self, pawcart_client::ApiError> {
        let api = ApiClient::new(&config.backend)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                badges: BadgeCounters::default(),
            }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the pending-work badge counters.
    #[must_use]
    pub fn badges(&self) -> &BadgeCounters {
        &self.inner.badges
    }
}
