//! Unified error handling for the storefront API.
//!
//! Provides a unified `AppError` type mapped onto HTTP statuses with
//! client-safe JSON bodies. All route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use batra_creation_core::CheckoutError;

use crate::services::gemini::AnalysisError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Checkout or order placement was rejected by the engine.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Shop-image analysis failed.
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Shop-image analysis is not configured on this deployment.
    #[error("Analysis unavailable")]
    AnalysisUnavailable,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_to: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_fields: Option<Vec<&'static str>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal(_) | Self::Analysis(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Checkout(err) => match err {
                CheckoutError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
                CheckoutError::DuplicateSubmission => StatusCode::CONFLICT,
                CheckoutError::EmptyCart | CheckoutError::IncompleteShipping { .. } => {
                    StatusCode::BAD_REQUEST
                }
            },
            Self::Analysis(_) => StatusCode::BAD_GATEWAY,
            Self::AnalysisUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Point unauthenticated checkout attempts at the login surface.
        let redirect_to = match &self {
            Self::Checkout(CheckoutError::AuthenticationRequired) => Some("/auth/login"),
            _ => None,
        };

        let missing_fields = match &self {
            Self::Checkout(CheckoutError::IncompleteShipping { missing }) => Some(missing.clone()),
            _ => None,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Analysis(_) => {
                "Shop analysis failed, please try again with another image".to_string()
            }
            Self::AnalysisUnavailable => "Shop analysis is not available".to_string(),
            _ => self.to_string(),
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                redirect_to,
                missing_fields,
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
