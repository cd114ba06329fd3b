//! Batra Creation Storefront - wholesale garment storefront API.
//!
//! Serves the public storefront on port 3000 by default.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API
//! - Static product catalog loaded once at start-up (file or embedded seed)
//! - Single in-memory session (cart, identity, order ledger); nothing is
//!   persisted across restarts
//! - Fire-and-forget outbound dispatch: order notification webhook and the
//!   Gemini shop-analysis call

#![cfg_attr(not(test), forbid(unsafe_code))]

use batra_creation_storefront::{app, catalog, config::StorefrontConfig, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "batra_creation_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Load the catalog once; it is immutable for the life of the process
    let catalog =
        catalog::load(config.catalog_path.as_deref()).expect("Failed to load product catalog");
    tracing::info!(products = catalog.len(), "Catalog loaded");

    // Build application state
    let addr = config.socket_addr();
    let state = AppState::new(config, catalog).expect("Failed to initialize application state");

    // Start server
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
