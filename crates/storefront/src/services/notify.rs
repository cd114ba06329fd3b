//! Order notification dispatch.
//!
//! The engine composes an [`OrderNotification`]; this module delivers it to
//! the configured webhook. Dispatch is fire-and-forget: it runs on a spawned
//! task after the order is already committed to the ledger, receives no
//! delivery confirmation, and does not retry. Failures are logged and
//! otherwise dropped.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use thiserror::Error;
use tracing::instrument;

use batra_creation_core::OrderNotification;

/// Errors that can occur while dispatching a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Webhook returned an error response.
    #[error("Webhook error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Webhook client for order notifications.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl WebhookNotifier {
    /// Create a new webhook notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(webhook_url: String) -> Result<Self, NotifyError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            webhook_url,
        })
    }

    /// Deliver one notification to the webhook.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the webhook responds with a
    /// non-success status.
    #[instrument(skip(self, notification), fields(recipient = %notification.recipient))]
    pub async fn dispatch(&self, notification: &OrderNotification) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(notification)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

/// Dispatch a notification on a background task.
///
/// The order is already committed by the time this runs; a failed or stalled
/// dispatch leaves the ledger exactly as it is.
pub fn dispatch_in_background(notifier: WebhookNotifier, notification: OrderNotification) {
    tokio::spawn(async move {
        if let Err(e) = notifier.dispatch(&notification).await {
            tracing::warn!(
                error = %e,
                subject = %notification.subject,
                "Order notification dispatch failed"
            );
        }
    });
}
