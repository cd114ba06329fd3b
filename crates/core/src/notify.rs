//! Order notification payload composition.
//!
//! Placing an order produces one outbound message to the seller. The engine
//! only composes the payload; dispatch (webhook post, mail client hand-off)
//! happens elsewhere and is fire-and-forget, so nothing here waits on or
//! observes delivery.

use serde::{Deserialize, Serialize};

use crate::order::Order;

/// A composed notification, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNotification {
    /// Destination address.
    pub recipient: String,
    /// Subject line: order id plus the buyer's shop name.
    pub subject: String,
    /// Full plain-text body.
    pub body: String,
}

impl OrderNotification {
    /// Compose the notification for a freshly committed order.
    ///
    /// The body carries, in order: order id, date, payment method, one line
    /// per item with quantity and line subtotal, the grand total, and the
    /// complete shipping block.
    #[must_use]
    pub fn for_order(order: &Order, recipient: &str) -> Self {
        let shipping = &order.shipping_details;
        let subject = format!("New Order #{} - {}", order.id, shipping.shop_name);

        let items = order
            .items
            .iter()
            .map(|line| {
                format!(
                    "- {} (Qty: {}) - {}{}",
                    line.name,
                    line.quantity,
                    line.price.currency_code.symbol(),
                    line.line_total()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let currency = order
            .items
            .first()
            .map_or("₹", |line| line.price.currency_code.symbol());

        let body = format!(
            "Hello Batra Creation,\n\
             \n\
             I would like to place a new order.\n\
             \n\
             Order Details:\n\
             Order ID: {id}\n\
             Date: {date}\n\
             Payment Method: {payment}\n\
             \n\
             Items:\n\
             {items}\n\
             \n\
             Total Amount: {currency}{total}\n\
             \n\
             Shipping Address:\n\
             Name: {name}\n\
             Shop Name: {shop}\n\
             Address: {address}\n\
             City: {city}\n\
             State: {state}\n\
             Pincode: {pincode}\n\
             Phone: {phone}\n\
             \n\
             Please confirm my order.\n\
             \n\
             Regards,\n\
             {name}\n",
            id = order.id,
            date = order.placed_at.format("%d/%m/%Y"),
            payment = order.payment_method,
            items = items,
            currency = currency,
            total = order.total,
            name = shipping.full_name,
            shop = shipping.shop_name,
            address = shipping.address_line1,
            city = shipping.city,
            state = shipping.state,
            pincode = shipping.pincode,
            phone = shipping.phone,
        );

        Self {
            recipient: recipient.to_owned(),
            subject,
            body,
        }
    }

    /// Render the notification as a `mailto:` deep-link for hand-off to an
    /// external mail client.
    #[must_use]
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body),
        )
    }
}
