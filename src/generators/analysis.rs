//! Product photo analysis.

use serde_json::json;
use tracing::info;

use crate::error::{Result, StudioError};
use crate::models::{ImageData, ProductAnalysis};
use crate::provider::Provider;
use crate::wire::{GenerateContentRequest, GenerationConfig, Part};

const PROMPT: &str = "Analyze this product photo for a marketing campaign. \
Identify the product's name, its type or category, the materials it is made of, \
its primary colors, and a short description of its target audience.";

/// JSON schema the analysis response must follow.
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "productName": { "type": "STRING" },
            "productType": { "type": "STRING" },
            "materials": { "type": "ARRAY", "items": { "type": "STRING" } },
            "primaryColors": { "type": "ARRAY", "items": { "type": "STRING" } },
            "targetAudience": { "type": "STRING" }
        },
        "required": ["productName", "productType", "materials", "primaryColors", "targetAudience"]
    })
}

/// Sends a product image to the provider and parses the structured reply.
pub struct Analyzer<'a> {
    provider: &'a dyn Provider,
    model: &'a str,
}

impl<'a> Analyzer<'a> {
    pub fn new(provider: &'a dyn Provider, model: &'a str) -> Self {
        Self { provider, model }
    }

    pub fn request(image: &ImageData) -> GenerateContentRequest {
        GenerateContentRequest::user(vec![Part::image(image), Part::text(PROMPT)])
            .with_config(GenerationConfig::json(response_schema()))
    }

    /// Analyze `image`. Unlike the other generators a malformed reply is a
    /// hard failure, since every later step depends on the analysis.
    pub fn analyze(&self, image: &ImageData) -> Result<ProductAnalysis> {
        let response = self
            .provider
            .generate_content(self.model, &Self::request(image))?;
        let text = response
            .text()
            .ok_or_else(|| StudioError::EmptyResponse("product analysis".into()))?;
        let analysis: ProductAnalysis = serde_json::from_str(strip_fences(&text))?;
        info!(product = %analysis.product_name, "product analyzed");
        Ok(analysis)
    }
}

/// Models occasionally wrap JSON in a markdown code fence even in JSON mode.
pub(crate) fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
