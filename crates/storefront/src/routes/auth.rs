//! Auth route handlers.
//!
//! The identity provider is mocked: any submitted profile is accepted as-is
//! and no password verification happens here. What matters to the engine is
//! only whether an identity is present, and that the shipping form is
//! re-derived from the profile on every login.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use batra_creation_core::{Identity, ShippingDetails};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub email: String,
    pub shop_name: String,
    #[serde(default)]
    pub shop_address: Option<String>,
}

/// Login response: the active identity plus the pre-seeded shipping form.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub identity: Identity,
    pub shipping: ShippingDetails,
}

/// Record a login.
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    if form.email.trim().is_empty() {
        return Err(AppError::BadRequest("email is required".to_string()));
    }

    let identity = Identity {
        name: form.name,
        email: form.email,
        shop_name: form.shop_name,
        shop_address: form.shop_address,
    };

    let mut session = state.session().lock().await;
    session.login(identity.clone());

    Ok(Json(LoginResponse {
        identity,
        shipping: session.shipping().clone(),
    }))
}

/// Clear the active identity. Cart and order history survive.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    let mut session = state.session().lock().await;
    session.logout();
    StatusCode::NO_CONTENT
}
