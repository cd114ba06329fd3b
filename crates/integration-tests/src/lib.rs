//! Integration tests for the Batra Creation storefront.
//!
//! The tests in `tests/` drive the full axum router in-process via
//! `tower::ServiceExt::oneshot`; no server, network, or external service is
//! required. Each test builds a fresh application with the embedded seed
//! catalog and no outbound clients configured.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p batra-creation-integration-tests
//! ```
