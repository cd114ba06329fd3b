//! Shipping address block.
//!
//! All fields are free-form, user-editable strings. The storefront form is
//! responsible for blocking submission while required fields are empty; the
//! engine never commits an incomplete block.

use serde::{Deserialize, Serialize};

use crate::auth::Identity;

/// The shipping address captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub full_name: String,
    pub shop_name: String,
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
}

impl ShippingDetails {
    /// Merge identity profile fields into the form.
    ///
    /// Each field takes the profile's value when it is present and
    /// non-empty; otherwise it keeps whatever the form already holds. Runs
    /// on every transition into the authenticated state, including re-login.
    pub fn merge_identity(&mut self, identity: &Identity) {
        merge_field(&mut self.full_name, &identity.name);
        merge_field(&mut self.shop_name, &identity.shop_name);
        if let Some(address) = &identity.shop_address {
            merge_field(&mut self.address_line1, address);
        }
    }

    /// Names of required fields that are currently empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("full_name", &self.full_name),
            ("shop_name", &self.shop_name),
            ("address_line1", &self.address_line1),
            ("city", &self.city),
            ("state", &self.state),
            ("pincode", &self.pincode),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        missing
    }

    /// Whether every required field is filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

fn merge_field(target: &mut String, source: &str) {
    if !source.is_empty() {
        source.clone_into(target);
    }
}
