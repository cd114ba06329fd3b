//! The session context: cart, identity gate, checkout flow, and ledger.
//!
//! One `Session` owns all mutable storefront state for one running session.
//! Every transition is synchronous and runs to completion, so no locking is
//! needed inside the engine; callers serialize access.
//!
//! Checkout is a two-step handshake. `initiate_checkout` verifies an
//! identity is present and issues a single-use token; `place_order` consumes
//! that token. A stale or reused token is rejected, which is what stops a
//! double-tapped submit button from committing two orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{AuthGate, Identity};
use crate::cart::CartStore;
use crate::order::{Order, OrderLedger};
use crate::shipping::ShippingDetails;
use crate::types::{OrderId, OrderStatus, PaymentMethod};

/// Single-use token issued at checkout entry and consumed at placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutToken(Uuid);

impl CheckoutToken {
    fn issue() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for CheckoutToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised by checkout entry and order placement.
///
/// Every error leaves the session completely unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// No identity is present; the caller should redirect to authentication.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The checkout token was missing, already consumed, or does not match
    /// the current attempt.
    #[error("duplicate or stale order submission")]
    DuplicateSubmission,

    /// The cart holds no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Required shipping fields are empty. The form is expected to block
    /// this before it reaches the engine.
    #[error("incomplete shipping details: missing {}", missing.join(", "))]
    IncompleteShipping { missing: Vec<&'static str> },
}

/// All mutable state of one storefront session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    cart: CartStore,
    auth: AuthGate,
    ledger: OrderLedger,
    shipping: ShippingDetails,
    payment_method: PaymentMethod,
    checkout_token: Option<CheckoutToken>,
}

impl Session {
    /// Create a fresh session: empty cart, no identity, empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active cart, read-only.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The active cart, for shopping mutations.
    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// The identity gate.
    #[must_use]
    pub const fn auth(&self) -> &AuthGate {
        &self.auth
    }

    /// The order ledger.
    #[must_use]
    pub const fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    /// Current shipping form state.
    #[must_use]
    pub const fn shipping(&self) -> &ShippingDetails {
        &self.shipping
    }

    /// Currently selected payment method.
    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Record a successful external login.
    ///
    /// Re-derives the shipping form from the profile on every call, not just
    /// the first: present, non-empty profile fields win, everything else
    /// keeps its current form value.
    pub fn login(&mut self, identity: Identity) {
        self.shipping.merge_identity(&identity);
        self.auth.login(identity);
    }

    /// Clear the active identity. Cart, ledger, and shipping form survive.
    pub fn logout(&mut self) {
        self.auth.logout();
        self.checkout_token = None;
    }

    /// Enter checkout.
    ///
    /// # Errors
    ///
    /// `AuthenticationRequired` when no identity is present; the cart is
    /// untouched and the caller redirects to the authentication entry point.
    pub fn initiate_checkout(&mut self) -> Result<CheckoutToken, CheckoutError> {
        if !self.auth.is_authenticated() {
            return Err(CheckoutError::AuthenticationRequired);
        }
        let token = CheckoutToken::issue();
        self.checkout_token = Some(token);
        Ok(token)
    }

    /// Convert the current cart into an immutable order.
    ///
    /// On success the order carries a fresh id, a snapshot of the cart lines
    /// and shipping block, the total recomputed at this instant, and status
    /// `Pending`. It is prepended to the ledger, the cart is cleared, and
    /// the token is consumed so a replayed submit cannot commit twice.
    ///
    /// # Errors
    ///
    /// - `AuthenticationRequired` - no identity; cart and ledger untouched
    /// - `DuplicateSubmission` - token missing, stale, or already consumed
    /// - `EmptyCart` - nothing to commit
    /// - `IncompleteShipping` - a required shipping field is empty
    pub fn place_order(
        &mut self,
        token: CheckoutToken,
        shipping: ShippingDetails,
        payment_method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> Result<Order, CheckoutError> {
        if !self.auth.is_authenticated() {
            return Err(CheckoutError::AuthenticationRequired);
        }
        if self.checkout_token != Some(token) {
            return Err(CheckoutError::DuplicateSubmission);
        }
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let missing = shipping.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::IncompleteShipping { missing });
        }

        self.checkout_token = None;
        self.shipping = shipping;
        self.payment_method = payment_method;

        let order = Order {
            id: OrderId::generate(),
            placed_at: now,
            items: self.cart.lines().to_vec(),
            total: self.cart.total(),
            status: OrderStatus::Pending,
            shipping_details: self.shipping.clone(),
            payment_method,
        };

        // Commit precedes any dispatch attempt: the ledger entry exists even
        // if an outbound notification later stalls.
        self.ledger.append(order.clone());
        self.cart.clear();
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_fixtures::{chiffon_dress, tshirt};

    fn identity() -> Identity {
        Identity {
            name: "Demo User".to_owned(),
            email: "demo@example.com".to_owned(),
            shop_name: "My Fashion Store".to_owned(),
            shop_address: Some("Jaipur, Rajasthan".to_owned()),
        }
    }

    fn complete_shipping() -> ShippingDetails {
        ShippingDetails {
            full_name: "Demo User".to_owned(),
            shop_name: "My Fashion Store".to_owned(),
            address_line1: "Ganj Road".to_owned(),
            city: "Khairthal".to_owned(),
            state: "Rajasthan".to_owned(),
            pincode: "301404".to_owned(),
            phone: "9680465146".to_owned(),
        }
    }

    /// Session with identity, a two-add cart (qty 51 of the 165-rupee
    /// dress), and checkout entered.
    fn checkout_ready() -> (Session, CheckoutToken) {
        let mut session = Session::new();
        session.login(identity());
        let product = chiffon_dress();
        session.cart_mut().add_item(&product);
        session.cart_mut().add_item(&product);
        let token = session.initiate_checkout().expect("authenticated");
        (session, token)
    }

    #[test]
    fn checkout_entry_requires_identity() {
        let mut session = Session::new();
        session.cart_mut().add_item(&chiffon_dress());

        let result = session.initiate_checkout();
        assert_eq!(result, Err(CheckoutError::AuthenticationRequired));
        // No other side effect: cart and ledger untouched.
        assert_eq!(session.cart().total(), 165 * 50);
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn login_preseeds_shipping_form() {
        let mut session = Session::new();
        session.login(identity());
        assert_eq!(session.shipping().full_name, "Demo User");
        assert_eq!(session.shipping().shop_name, "My Fashion Store");
        assert_eq!(session.shipping().address_line1, "Jaipur, Rajasthan");
    }

    #[test]
    fn relogin_remerges_shipping() {
        let mut session = Session::new();
        session.login(identity());
        session.logout();

        let other = Identity {
            name: "Second Owner".to_owned(),
            email: "second@example.com".to_owned(),
            shop_name: String::new(),
            shop_address: None,
        };
        session.login(other);
        assert_eq!(session.shipping().full_name, "Second Owner");
        // Empty profile fields never wipe existing form values.
        assert_eq!(session.shipping().shop_name, "My Fashion Store");
    }

    #[test]
    fn place_order_commits_clears_and_prepends() {
        let (mut session, token) = checkout_ready();
        let now = Utc::now();

        let order = session
            .place_order(token, complete_shipping(), PaymentMethod::Upi, now)
            .expect("order placed");

        assert_eq!(order.total, 8415);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.placed_at, now);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 51);
        assert_eq!(order.payment_method, PaymentMethod::Upi);

        assert!(session.cart().is_empty());
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.ledger().orders()[0].id, order.id);
    }

    #[test]
    fn order_items_are_independent_of_later_cart_mutations() {
        let (mut session, token) = checkout_ready();
        let order = session
            .place_order(token, complete_shipping(), PaymentMethod::Upi, Utc::now())
            .expect("order placed");

        // Shop again and mutate the refilled cart.
        session.cart_mut().add_item(&tshirt());
        session.cart_mut().update_quantity(&tshirt().id, 100);

        let ledgered = &session.ledger().orders()[0];
        assert_eq!(ledgered.items, order.items);
        assert_eq!(ledgered.items[0].quantity, 51);
        assert_eq!(ledgered.total, 8415);
    }

    #[test]
    fn duplicate_submission_is_rejected() {
        let (mut session, token) = checkout_ready();
        session
            .place_order(token, complete_shipping(), PaymentMethod::Upi, Utc::now())
            .expect("first placement");

        // Refill the cart, then replay the consumed token.
        session.cart_mut().add_item(&chiffon_dress());
        let result =
            session.place_order(token, complete_shipping(), PaymentMethod::Upi, Utc::now());
        assert_eq!(result, Err(CheckoutError::DuplicateSubmission));
        assert_eq!(session.ledger().len(), 1);
        assert!(!session.cart().is_empty());
    }

    #[test]
    fn stale_token_is_rejected_after_reinitiation() {
        let (mut session, old_token) = checkout_ready();
        let _new_token = session.initiate_checkout().expect("re-entry");

        let result =
            session.place_order(old_token, complete_shipping(), PaymentMethod::Upi, Utc::now());
        assert_eq!(result, Err(CheckoutError::DuplicateSubmission));
    }

    #[test]
    fn placement_without_identity_changes_nothing() {
        let (mut session, token) = checkout_ready();
        session.logout();
        session.login(identity());
        // Logout invalidated the token; also test the fully signed-out path.
        session.logout();

        let result =
            session.place_order(token, complete_shipping(), PaymentMethod::Upi, Utc::now());
        assert_eq!(result, Err(CheckoutError::AuthenticationRequired));
        assert_eq!(session.cart().total(), 8415);
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn empty_cart_cannot_be_committed() {
        let mut session = Session::new();
        session.login(identity());
        let token = session.initiate_checkout().expect("authenticated");

        let result =
            session.place_order(token, complete_shipping(), PaymentMethod::Upi, Utc::now());
        assert_eq!(result, Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn incomplete_shipping_is_rejected_defensively() {
        let (mut session, token) = checkout_ready();
        let mut shipping = complete_shipping();
        shipping.pincode = String::new();

        let result = session.place_order(token, shipping, PaymentMethod::Upi, Utc::now());
        assert_eq!(
            result,
            Err(CheckoutError::IncompleteShipping {
                missing: vec!["pincode"]
            })
        );
        assert!(!session.cart().is_empty());
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn committed_shipping_and_payment_become_form_state() {
        let (mut session, token) = checkout_ready();
        session
            .place_order(
                token,
                complete_shipping(),
                PaymentMethod::NetBanking,
                Utc::now(),
            )
            .expect("order placed");
        assert_eq!(session.payment_method(), PaymentMethod::NetBanking);
        assert_eq!(session.shipping(), &complete_shipping());
    }
}
