//! Order history route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use batra_creation_core::Order;

use crate::state::AppState;

/// List placed orders, most recent first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Order>> {
    let session = state.session().lock().await;
    Json(session.ledger().orders().to_vec())
}
