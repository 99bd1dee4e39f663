//! Lifestyle photo generation.

use tracing::info;

use crate::error::{Result, StudioError};
use crate::models::{ImageData, ProductAnalysis};
use crate::provider::Provider;
use crate::wire::{GenerateContentRequest, GenerationConfig, Part};

pub struct LifestyleImageGenerator<'a> {
    provider: &'a dyn Provider,
    model: &'a str,
}

impl<'a> LifestyleImageGenerator<'a> {
    pub fn new(provider: &'a dyn Provider, model: &'a str) -> Self {
        Self { provider, model }
    }

    pub fn prompt(analysis: &ProductAnalysis) -> String {
        format!(
            "Create a photorealistic lifestyle photograph featuring this exact product: {}. \
             Place it in a natural, aspirational real-world setting that would appeal to {}. \
             Keep the product's shape, colors and materials unchanged; use soft natural \
             lighting and a shallow depth of field.",
            analysis.summary(),
            if analysis.target_audience.is_empty() {
                "its audience"
            } else {
                analysis.target_audience.as_str()
            }
        )
    }

    pub fn request(image: &ImageData, analysis: &ProductAnalysis) -> GenerateContentRequest {
        GenerateContentRequest::user(vec![Part::image(image), Part::text(Self::prompt(analysis))])
            .with_config(GenerationConfig::image())
    }

    /// Render the product into a lifestyle scene.
    ///
    /// Fails with [`StudioError::NoImageGenerated`] when the reply carries no
    /// inline image (for example when the model answers with text only).
    pub fn generate(&self, image: &ImageData, analysis: &ProductAnalysis) -> Result<ImageData> {
        let response = self
            .provider
            .generate_content(self.model, &Self::request(image, analysis))?;
        let rendered = response.first_image().ok_or(StudioError::NoImageGenerated)?;
        info!(mime = %rendered.mime_type, "lifestyle image generated");
        Ok(rendered)
    }
}
