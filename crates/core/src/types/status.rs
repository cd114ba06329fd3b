//! Status and payment enums.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a placed order.
///
/// Orders are created `Pending`. The later transitions exist for display of
/// records imported from elsewhere; nothing in this engine moves an order
/// beyond `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
        };
        write!(f, "{s}")
    }
}

/// Payment methods offered at checkout.
///
/// A closed set; the wire form matches the labels shown to buyers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "UPI")]
    Upi,
    NetBanking,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Upi => "UPI",
            Self::NetBanking => "NetBanking",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPI" => Ok(Self::Upi),
            "NetBanking" => Ok(Self::NetBanking),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}
