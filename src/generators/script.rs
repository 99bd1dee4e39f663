//! Short-form video script.

use tracing::{info, warn};

use crate::error::Result;
use crate::models::ProductAnalysis;
use crate::provider::Provider;
use crate::wire::{GenerateContentRequest, Part};

pub struct ScriptWriter<'a> {
    provider: &'a dyn Provider,
    model: &'a str,
}

impl<'a> ScriptWriter<'a> {
    pub fn new(provider: &'a dyn Provider, model: &'a str) -> Self {
        Self { provider, model }
    }

    pub fn prompt(analysis: &ProductAnalysis) -> String {
        format!(
            "Write a punchy 30-second TikTok script promoting {}. \
             Open with a scroll-stopping hook, show the product in use, and end with a \
             clear call to action. Format it as short lines with on-screen text and \
             voiceover cues. Return only the script.",
            analysis.summary()
        )
    }

    /// Write the script. An empty reply yields an empty string, not an error.
    pub fn write(&self, analysis: &ProductAnalysis) -> Result<String> {
        let request = GenerateContentRequest::user(vec![Part::text(Self::prompt(analysis))]);
        let response = self.provider.generate_content(self.model, &request)?;
        match response.text() {
            Some(text) => {
                info!(chars = text.len(), "script written");
                Ok(text.trim().to_string())
            }
            None => {
                warn!("script response had no text");
                Ok(String::new())
            }
        }
    }
}
