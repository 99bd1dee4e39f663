//! B-roll shot ideas.

use serde_json::json;
use tracing::{info, warn};

use crate::config::BROLL_IDEA_COUNT;
use crate::error::Result;
use crate::generators::analysis::strip_fences;
use crate::models::ProductAnalysis;
use crate::provider::Provider;
use crate::wire::{GenerateContentRequest, GenerationConfig, Part};

pub struct BRollIdeator<'a> {
    provider: &'a dyn Provider,
    model: &'a str,
}

impl<'a> BRollIdeator<'a> {
    pub fn new(provider: &'a dyn Provider, model: &'a str) -> Self {
        Self { provider, model }
    }

    pub fn prompt(analysis: &ProductAnalysis) -> String {
        format!(
            "Suggest exactly {} short B-roll shot ideas for a marketing video about {}. \
             Each idea should be a single sentence usable as a prompt for an AI video \
             generator, describing subject, motion and camera movement.",
            BROLL_IDEA_COUNT,
            analysis.summary()
        )
    }

    pub fn request(analysis: &ProductAnalysis) -> GenerateContentRequest {
        let schema = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
        GenerateContentRequest::user(vec![Part::text(Self::prompt(analysis))])
            .with_config(GenerationConfig::json(schema))
    }

    /// Ask for ideas. Malformed replies degrade to an empty list; longer
    /// lists are truncated to the fixed idea count.
    pub fn ideate(&self, analysis: &ProductAnalysis) -> Result<Vec<String>> {
        let response = self
            .provider
            .generate_content(self.model, &Self::request(analysis))?;
        let ideas = response
            .text()
            .map(|text| parse_ideas(&text))
            .unwrap_or_default();
        if ideas.is_empty() {
            warn!("B-roll response had no usable ideas");
        } else {
            info!(count = ideas.len(), "B-roll ideas generated");
        }
        Ok(ideas)
    }
}

fn parse_ideas(text: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(strip_fences(text)) {
        Ok(list) => list
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .take(BROLL_IDEA_COUNT)
            .collect(),
        Err(e) => {
            warn!(error = %e, "could not parse B-roll ideas");
            Vec::new()
        }
    }
}
