//! Gemini API client for shop-image analysis.
//!
//! A buyer uploads a photo of their retail shop; Gemini looks at the
//! interior and suggests the catalog products most likely to sell there.
//! Failures are recoverable and user-retryable, and never touch cart or
//! order state.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use batra_creation_core::{Catalog, ProductId};

use crate::config::GeminiConfig;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Errors that can occur during shop-image analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response did not contain parseable analysis JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The configured API key is not a valid header value.
    #[error("Invalid API key format")]
    InvalidApiKey,
}

/// The analysis returned to the buyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Why these products fit the shop's look and clientele.
    pub recommendation: String,
    /// Catalog ids of the suggested products.
    pub suggested_product_ids: Vec<ProductId>,
}

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key contains invalid header characters or
    /// the HTTP client fails to build.
    pub fn new(config: &GeminiConfig) -> Result<Self, AnalysisError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(config.api_key.expose_secret())
                .map_err(|_| AnalysisError::InvalidApiKey)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                model: config.model.clone(),
            }),
        })
    }

    /// Analyze a shop photo against the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot be
    /// parsed into an [`AnalysisResult`].
    #[instrument(skip(self, image_base64, catalog), fields(model = %self.inner.model))]
    pub async fn analyze_shop_image(
        &self,
        image_base64: &str,
        catalog: &Catalog,
    ) -> Result<AnalysisResult, AnalysisError> {
        let request = build_request(image_base64, catalog);
        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.inner.model);

        let response = self.inner.client.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Parse(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| AnalysisError::Parse("empty model response".to_string()))?;

        serde_json::from_str(&text).map_err(|e| AnalysisError::Parse(e.to_string()))
    }
}

/// Build the analysis prompt and request body.
fn build_request(image_base64: &str, catalog: &Catalog) -> GenerateContentRequest {
    let product_list = catalog
        .products()
        .iter()
        .map(|p| format!("{} (ID: {}, Style: {})", p.name, p.id, p.description))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = format!(
        "You are an expert fashion wholesale consultant.\n\
         Analyze the interior and vibe of this client's retail shop from the image provided.\n\
         Determine the target demographic and aesthetic (e.g., high-end boutique, casual \
         street wear, budget-friendly, traditional).\n\
         \n\
         Based on the shop's look, recommend the best matching products from my wholesale \
         catalog below:\n\
         {product_list}\n\
         \n\
         Return the result in JSON format with two fields:\n\
         1. \"recommendation\": A paragraph explaining the shop's vibe and why these specific \
         products would sell well there.\n\
         2. \"suggestedProductIds\": An array of strings containing the IDs of the top 3-4 \
         recommended products."
    );

    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: "image/jpeg".to_string(),
                        data: image_base64.to_string(),
                    }),
                },
                Part {
                    text: Some(prompt),
                    inline_data: None,
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
        },
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
