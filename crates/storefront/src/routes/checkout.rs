//! Checkout route handlers.
//!
//! Checkout is a two-step flow. `POST /checkout` verifies an identity is
//! present and returns a single-use token alongside the pre-seeded shipping
//! form; `POST /checkout/place` spends that token to commit the order. The
//! token is what makes a double-tapped submit harmless: the second request
//! fails with 409 instead of producing a second order.
//!
//! The order is committed to the ledger before any dispatch is attempted;
//! a stalled or failed notification never reverts it.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use batra_creation_core::{
    CheckoutToken, Order, OrderNotification, PaymentMethod, ShippingDetails, upi_payment_link,
};

use crate::error::Result;
use crate::services::notify;
use crate::state::AppState;

/// Checkout entry response.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Single-use token to send back with the placement request.
    pub checkout_token: CheckoutToken,
    /// Shipping form state, pre-seeded from the identity profile.
    pub shipping: ShippingDetails,
    /// Payment methods on offer.
    pub payment_methods: Vec<PaymentMethod>,
    /// Cart total at entry time.
    pub total: i64,
    pub total_display: String,
}

/// Order placement request body.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub checkout_token: CheckoutToken,
    pub shipping: ShippingDetails,
    pub payment_method: PaymentMethod,
}

/// Order placement response.
#[derive(Debug, Serialize)]
pub struct PlacedOrderResponse {
    /// The committed, immutable order.
    pub order: Order,
    /// `mailto:` deep-link carrying the composed notification.
    pub notification_mailto: String,
    /// UPI deep-link for the wallet hand-off; present for UPI payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_payment_link: Option<String>,
}

/// Enter checkout.
///
/// Without an identity this responds 401 with a redirect hint to the login
/// surface and touches nothing.
#[instrument(skip(state))]
pub async fn initiate(State(state): State<AppState>) -> Result<Json<CheckoutResponse>> {
    let mut session = state.session().lock().await;
    let checkout_token = session.initiate_checkout()?;

    Ok(Json(CheckoutResponse {
        checkout_token,
        shipping: session.shipping().clone(),
        payment_methods: vec![PaymentMethod::Upi, PaymentMethod::NetBanking],
        total: session.cart().total(),
        total_display: format!("₹{}", session.cart().total()),
    }))
}

/// Place the order.
///
/// Validates the shipping block at the form boundary, commits through the
/// engine, then fire-and-forget dispatches the notification.
#[instrument(skip(state, form))]
pub async fn place(
    State(state): State<AppState>,
    Json(form): Json<PlaceOrderRequest>,
) -> Result<Json<PlacedOrderResponse>> {
    let order = {
        let mut session = state.session().lock().await;
        session.place_order(
            form.checkout_token,
            form.shipping,
            form.payment_method,
            Utc::now(),
        )?
    };

    tracing::info!(
        order_id = %order.id,
        total = order.total,
        payment = %order.payment_method,
        "Order placed"
    );

    let notification = OrderNotification::for_order(&order, &state.config().notify.recipient);
    if let Some(notifier) = state.notifier() {
        notify::dispatch_in_background(notifier.clone(), notification.clone());
    }

    let upi_payment_link = (order.payment_method == PaymentMethod::Upi).then(|| {
        upi_payment_link(
            &state.config().upi_payee,
            order.total,
            batra_creation_core::CurrencyCode::Inr,
        )
    });

    Ok(Json(PlacedOrderResponse {
        notification_mailto: notification.mailto_url(),
        upi_payment_link,
        order,
    }))
}
