//! Batra Creation Core - cart and order lifecycle engine.
//!
//! This crate implements the rules of the wholesale storefront that actually
//! carry state: how cart lines are created and mutated, how a cart is frozen
//! into an immutable order, and how placed orders are retained and queried.
//! Everything else in the repository (HTTP surface, catalog data files,
//! outbound dispatch) is glue around this crate.
//!
//! # Architecture
//!
//! The core crate contains only types and pure transitions - no I/O, no HTTP
//! clients, no clocks of its own. Callers supply timestamps and products;
//! side effects (notification dispatch, payment hand-off) are composed here
//! as values and carried out elsewhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, and statuses
//! - [`catalog`] - Immutable product catalog
//! - [`cart`] - The mutable cart and its derived totals
//! - [`auth`] - Identity gate for checkout entry
//! - [`shipping`] - Shipping address block and identity pre-fill
//! - [`order`] - Immutable orders and the append-only ledger
//! - [`session`] - The session context tying the above together
//! - [`notify`] - Order notification payload composition
//! - [`payment`] - UPI payment deep-link composition

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod notify;
pub mod order;
pub mod payment;
pub mod session;
pub mod shipping;
pub mod types;

pub use auth::{AuthGate, Identity};
pub use cart::{CartLine, CartStore};
pub use catalog::{Catalog, CatalogError, Product};
pub use notify::OrderNotification;
pub use order::{Order, OrderLedger};
pub use payment::{UpiPayee, upi_payment_link};
pub use session::{CheckoutError, CheckoutToken, Session};
pub use shipping::ShippingDetails;
pub use types::*;
