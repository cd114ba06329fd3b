//! Catalog route handlers.

use axum::{Json, extract::Path, extract::State};
use tracing::instrument;

use batra_creation_core::{Product, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// List the full catalog in catalog order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().products().to_vec())
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id = ProductId::new(id);
    state
        .catalog()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
