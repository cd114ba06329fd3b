//! Identity gate for checkout entry.
//!
//! The identity provider itself is external and mocked upstream; this gate
//! only tracks whether an identity is currently present and blocks checkout
//! entry when it is not.

use serde::{Deserialize, Serialize};

/// The buyer identity supplied by the external provider on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Owner name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Retail shop name.
    pub shop_name: String,
    /// Optional shop address, used to pre-fill the shipping form.
    pub shop_address: Option<String>,
}

/// Two-state gatekeeper: unauthenticated or authenticated with an identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthGate {
    identity: Option<Identity>,
}

impl AuthGate {
    /// Create a gate in the unauthenticated state.
    #[must_use]
    pub const fn new() -> Self {
        Self { identity: None }
    }

    /// Transition to authenticated. Replaces any previously active identity.
    pub fn login(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    /// Transition back to unauthenticated.
    pub fn logout(&mut self) {
        self.identity = None;
    }

    /// The active identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Whether an identity is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
