//! Immutable orders and the append-only ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::shipping::ShippingDetails;
use crate::types::{OrderId, OrderStatus, PaymentMethod};

/// A placed order.
///
/// Everything in here is a snapshot taken at commit time: mutating the live
/// cart or the shipping form afterwards never affects a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order id.
    pub id: OrderId,
    /// Commit timestamp.
    pub placed_at: DateTime<Utc>,
    /// Cart lines frozen at commit time.
    pub items: Vec<CartLine>,
    /// Σ(price × quantity) over `items`, computed at commit time.
    pub total: i64,
    /// Lifecycle status; always `Pending` at creation.
    pub status: OrderStatus,
    /// Shipping block frozen at commit time.
    pub shipping_details: ShippingDetails,
    /// Payment method selected at commit time.
    pub payment_method: PaymentMethod,
}

/// Append-only, in-memory store of placed orders.
///
/// Scoped to the lifetime of the running session; entries are never edited
/// or removed, and the newest order is always first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

impl OrderLedger {
    /// Create an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Prepend a freshly committed order.
    pub fn append(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    /// All orders, most recent first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Number of placed orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no order has been placed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(total: i64) -> Order {
        Order {
            id: OrderId::generate(),
            placed_at: Utc::now(),
            items: Vec::new(),
            total,
            status: OrderStatus::Pending,
            shipping_details: ShippingDetails::default(),
            payment_method: PaymentMethod::Upi,
        }
    }

    #[test]
    fn append_keeps_most_recent_first() {
        let mut ledger = OrderLedger::new();
        let first = order(100);
        let second = order(200);
        let first_id = first.id;
        let second_id = second.id;

        ledger.append(first);
        ledger.append(second);

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.orders()[0].id, second_id);
        assert_eq!(ledger.orders()[1].id, first_id);
    }

    #[test]
    fn starts_empty() {
        let ledger = OrderLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.orders().is_empty());
    }
}
