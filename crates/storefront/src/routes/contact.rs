//! Seller contact information.

use axum::Json;
use serde::Serialize;
use tracing::instrument;

/// Static contact details for the seller.
#[derive(Debug, Clone, Serialize)]
pub struct ContactInfo {
    pub phone: &'static str,
    pub address: &'static str,
    pub email: &'static str,
}

/// Show seller contact information.
#[instrument]
pub async fn show() -> Json<ContactInfo> {
    Json(ContactInfo {
        phone: "9680465146",
        address: "Ganj Road near Rishi sonography, Kishangarh Bass, Khairthal, Rajasthan",
        email: "batracreation2003@gmail.com",
    })
}
