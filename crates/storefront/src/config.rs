//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CATALOG_PATH` - Path to a catalog JSON file (default: embedded seed)
//! - `ORDER_NOTIFY_EMAIL` - Recipient of order notifications
//!   (default: batracreation2003@gmail.com)
//! - `ORDER_NOTIFY_WEBHOOK` - Webhook URL for fire-and-forget order
//!   notification dispatch; when unset only the `mailto:` link is produced
//! - `UPI_PAYEE_VPA` - UPI virtual payment address (default: 96804651@ybl)
//! - `UPI_PAYEE_NAME` - UPI payee display name (default: Batra Creation)
//! - `GEMINI_API_KEY` - Gemini API key; enables the shop-analysis endpoint
//! - `GEMINI_MODEL` - Gemini model id (default: gemini-2.5-flash-image)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use batra_creation_core::UpiPayee;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Optional path to a catalog JSON file; the embedded seed is used when
    /// unset.
    pub catalog_path: Option<PathBuf>,
    /// Order notification settings.
    pub notify: NotifyConfig,
    /// UPI collection details for the payment deep-link.
    pub upi_payee: UpiPayee,
    /// Gemini configuration; `None` disables the shop-analysis endpoint.
    pub gemini: Option<GeminiConfig>,
}

/// Order notification settings.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Destination address for order notifications.
    pub recipient: String,
    /// Webhook URL for server-side dispatch, if any.
    pub webhook_url: Option<String>,
}

/// Gemini image-analysis configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Gemini API key.
    pub api_key: SecretString,
    /// Model id used for shop-image analysis.
    pub model: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let catalog_path = get_optional_env("CATALOG_PATH").map(PathBuf::from);

        let notify = NotifyConfig {
            recipient: get_env_or_default("ORDER_NOTIFY_EMAIL", "batracreation2003@gmail.com"),
            webhook_url: get_optional_env("ORDER_NOTIFY_WEBHOOK"),
        };

        let upi_payee = UpiPayee {
            vpa: get_env_or_default("UPI_PAYEE_VPA", "96804651@ybl"),
            display_name: get_env_or_default("UPI_PAYEE_NAME", "Batra Creation"),
        };

        let gemini = get_optional_env("GEMINI_API_KEY").map(|key| GeminiConfig {
            api_key: SecretString::from(key),
            model: get_env_or_default("GEMINI_MODEL", "gemini-2.5-flash-image"),
        });

        Ok(Self {
            host,
            port,
            catalog_path,
            notify,
            upi_payee,
            gemini,
        })
    }

    /// Configuration suitable for tests: loopback bind, embedded catalog,
    /// no webhook, no Gemini.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            catalog_path: None,
            notify: NotifyConfig {
                recipient: "orders@example.com".to_owned(),
                webhook_url: None,
            },
            upi_payee: UpiPayee {
                vpa: "96804651@ybl".to_owned(),
                display_name: "Batra Creation".to_owned(),
            },
            gemini: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
