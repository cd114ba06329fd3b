//! Cart route handlers.
//!
//! Every mutation responds with the full cart view so the client never has
//! to derive totals itself; the total is recomputed by the engine on each
//! request.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use batra_creation_core::{CartLine, CartStore, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub image: String,
    pub quantity: u32,
    pub min_order_quantity: u32,
    pub unit_price: i64,
    pub unit_price_display: String,
    pub line_total: i64,
    pub line_total_display: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: i64,
    pub total_display: String,
    pub item_count: u32,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            category: line.category.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            min_order_quantity: line.min_order_quantity,
            unit_price: line.price.amount,
            unit_price_display: line.price.display(),
            line_total: line.line_total(),
            line_total_display: format!(
                "{}{}",
                line.price.currency_code.symbol(),
                line.line_total()
            ),
        }
    }
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: cart.total(),
            total_display: format!("₹{}", cart.total()),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    /// Signed step; a result <= 0 leaves the line unchanged.
    pub delta: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let session = state.session().lock().await;
    Json(CartView::from(session.cart()))
}

/// Add a product to the cart.
///
/// The first add of a product seeds the line at the product's minimum order
/// quantity; later adds step by exactly 1.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(form): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get(&form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?
        .clone();

    let mut session = state.session().lock().await;
    session.cart_mut().add_item(&product);
    Ok(Json(CartView::from(session.cart())))
}

/// Apply a signed quantity delta to a line.
///
/// An update whose result would be zero or negative is a silent no-op, so
/// the response simply shows the cart unchanged.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(form): Json<UpdateCartRequest>,
) -> Json<CartView> {
    let mut session = state.session().lock().await;
    session.cart_mut().update_quantity(&form.product_id, form.delta);
    Json(CartView::from(session.cart()))
}

/// Remove a line unconditionally.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(form): Json<RemoveFromCartRequest>,
) -> Json<CartView> {
    let mut session = state.session().lock().await;
    session.cart_mut().remove_item(&form.product_id);
    Json(CartView::from(session.cart()))
}

/// Cart item count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    let session = state.session().lock().await;
    Json(CartCount {
        count: session.cart().item_count(),
    })
}
