//! UPI payment deep-link composition.
//!
//! Checkout hands payment off to an external wallet app via a `upi://pay`
//! URI. There is no callback path: the engine cannot observe whether the
//! payment succeeded, so the link is compose-and-forget.

use serde::{Deserialize, Serialize};

use crate::types::CurrencyCode;

/// The seller's UPI collection details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpiPayee {
    /// Virtual payment address (e.g. `96804651@ybl`).
    pub vpa: String,
    /// Display name shown in the wallet app.
    pub display_name: String,
}

/// Build the `upi://pay` deep-link for the given amount.
///
/// The amount is the cart total at confirmation time, in whole currency
/// units.
#[must_use]
pub fn upi_payment_link(payee: &UpiPayee, amount: i64, currency: CurrencyCode) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("pa", &payee.vpa)
        .append_pair("pn", &payee.display_name)
        .append_pair("am", &amount.to_string())
        .append_pair("cu", currency.code())
        .finish();
    format!("upi://pay?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payee() -> UpiPayee {
        UpiPayee {
            vpa: "96804651@ybl".to_owned(),
            display_name: "Batra Creation".to_owned(),
        }
    }

    #[test]
    fn link_encodes_payee_amount_and_currency() {
        let link = upi_payment_link(&payee(), 8415, CurrencyCode::Inr);
        assert!(link.starts_with("upi://pay?"));
        assert!(link.contains("pa=96804651%40ybl"));
        assert!(link.contains("pn=Batra+Creation"));
        assert!(link.contains("am=8415"));
        assert!(link.contains("cu=INR"));
    }
}
