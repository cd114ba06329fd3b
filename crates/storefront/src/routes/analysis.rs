//! Shop-image analysis route handler.
//!
//! Forwards a buyer's shop photo plus the catalog to the Gemini
//! collaborator. Failures are recoverable and retryable by the user, and
//! never touch cart or order state.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::gemini::AnalysisResult;
use crate::state::AppState;

/// Analysis request body.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Base64-encoded JPEG of the buyer's shop interior.
    pub image_base64: String,
}

/// Analyze a shop photo and suggest matching catalog products.
#[instrument(skip(state, form))]
pub async fn analyze(
    State(state): State<AppState>,
    Json(form): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>> {
    if form.image_base64.trim().is_empty() {
        return Err(AppError::BadRequest("image_base64 is required".to_string()));
    }

    let analyzer = state.analyzer().ok_or(AppError::AnalysisUnavailable)?;
    let result = analyzer
        .analyze_shop_image(&form.image_base64, state.catalog())
        .await?;
    Ok(Json(result))
}
