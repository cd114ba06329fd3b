//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Product listing
//! GET  /products/{id}          - Product detail
//! GET  /contact                - Seller contact information
//!
//! # Cart
//! GET  /cart                   - Cart view (lines + derived total)
//! POST /cart/add               - Add a product (first add seeds the MOQ)
//! POST /cart/update            - Apply a signed quantity delta
//! POST /cart/remove            - Remove a line
//! GET  /cart/count             - Item count badge
//!
//! # Checkout
//! POST /checkout               - Enter checkout (issues a single-use token)
//! POST /checkout/place         - Place the order
//!
//! # Orders
//! GET  /orders                 - Placed orders, most recent first
//!
//! # Auth (mocked identity provider)
//! POST /auth/login             - Login with a buyer profile
//! POST /auth/logout            - Logout
//!
//! # Analysis
//! POST /analysis               - Shop-image analysis (Gemini)
//! ```

pub mod analysis;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog routes
        .nest("/products", product_routes())
        .route("/contact", get(contact::show))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout flow
        .route("/checkout", post(checkout::initiate))
        .route("/checkout/place", post(checkout::place))
        // Order history
        .route("/orders", get(orders::index))
        // Auth routes
        .nest("/auth", auth_routes())
        // Shop-image analysis
        .route("/analysis", post(analysis::analyze))
}
