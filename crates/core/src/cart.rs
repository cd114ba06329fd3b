//! The active shopping cart.
//!
//! A cart holds at most one line per product id. Quantities are always at
//! least 1; the total is derived from the lines on every query and never
//! stored on its own.
//!
//! Two wholesale-specific rules live here and are deliberate:
//!
//! - The *first* add of a product seeds the line with the product's minimum
//!   order quantity; every later add steps the quantity by exactly 1.
//! - A quantity update whose result would be zero or negative is a silent
//!   no-op. The line keeps its previous quantity; nothing is clamped. This
//!   also means a buyer can step below the minimum order quantity one
//!   decrement at a time, which matches how the shop actually negotiates
//!   part-lots.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// One product-and-quantity pairing in the active cart.
///
/// Carries a snapshot of the product's attributes so a later catalog swap
/// cannot change what the buyer already priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id; unique within the cart.
    pub id: ProductId,
    /// Product name at the time the line was created.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Unit price at the time the line was created.
    pub price: Price,
    /// Image URL for display.
    pub image: String,
    /// Short description.
    pub description: String,
    /// Minimum order quantity of the product.
    pub min_order_quantity: u32,
    /// Current quantity; always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// Create the initial line for a product, seeded at its minimum order
    /// quantity.
    #[must_use]
    pub fn first_add(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            image: product.image.clone(),
            description: product.description.clone(),
            min_order_quantity: product.min_order_quantity,
            quantity: product.min_order_quantity,
        }
    }

    /// Price × quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> i64 {
        self.price.amount * i64::from(self.quantity)
    }
}

/// The mutable cart: the only component the storefront mutates directly for
/// shopping actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a product to the cart.
    ///
    /// If a line for the product already exists its quantity is incremented
    /// by exactly 1, regardless of the minimum order quantity. Otherwise a
    /// new line is created at the minimum order quantity.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine::first_add(product));
        }
    }

    /// Apply a signed quantity delta to a line.
    ///
    /// The new quantity replaces the old one only when it is strictly
    /// positive; otherwise the line is left completely unchanged. An unknown
    /// id is likewise a no-op.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| &l.id == id) {
            // The delta comes straight off the wire; an overflowing sum is
            // treated like any other out-of-range result.
            if let Some(new_qty) = i64::from(line.quantity).checked_add(delta)
                && let Ok(qty) = u32::try_from(new_qty)
                && qty > 0
            {
                line.quantity = qty;
            }
        }
    }

    /// Delete a line unconditionally, regardless of its quantity.
    ///
    /// Returns the removed line, if one existed.
    pub fn remove_item(&mut self, id: &ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| &l.id == id)?;
        Some(self.lines.remove(index))
    }

    /// Empty the cart. Called as the side effect of a committed order.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Derived total: Σ(price × quantity) over all lines, recomputed on
    /// every call.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
