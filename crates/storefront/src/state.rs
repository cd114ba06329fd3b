//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use batra_creation_core::{Catalog, Session};

use crate::config::StorefrontConfig;
use crate::services::gemini::{AnalysisError, GeminiClient};
use crate::services::notify::{NotifyError, WebhookNotifier};

/// Error constructing application state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("notification client: {0}")]
    Notify(#[from] NotifyError),
    #[error("gemini client: {0}")]
    Gemini(#[from] AnalysisError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The session holds all mutable storefront
/// state (cart, identity, ledger) behind one lock: the engine is
/// single-session and every mutation runs to completion while the lock is
/// held, so handlers never observe a half-applied transition.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    session: Mutex<Session>,
    notifier: Option<WebhookNotifier>,
    analyzer: Option<GeminiClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if an outbound service client fails to build.
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Result<Self, StateError> {
        let notifier = config
            .notify
            .webhook_url
            .clone()
            .map(WebhookNotifier::new)
            .transpose()?;
        let analyzer = config
            .gemini
            .as_ref()
            .map(GeminiClient::new)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                session: Mutex::new(Session::new()),
                notifier,
                analyzer,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the session lock.
    #[must_use]
    pub fn session(&self) -> &Mutex<Session> {
        &self.inner.session
    }

    /// Get the order notification webhook client, if configured.
    #[must_use]
    pub fn notifier(&self) -> Option<&WebhookNotifier> {
        self.inner.notifier.as_ref()
    }

    /// Get the Gemini analysis client, if configured.
    #[must_use]
    pub fn analyzer(&self) -> Option<&GeminiClient> {
        self.inner.analyzer.as_ref()
    }
}
