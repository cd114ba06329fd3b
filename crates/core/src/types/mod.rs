//! Core types for the Batra Creation storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;

pub use id::{OrderId, ProductId};
pub use price::{CurrencyCode, Price};
pub use status::{OrderStatus, PaymentMethod};
