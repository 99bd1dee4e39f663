use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ProductAnalysis: structured metadata extracted from a product photo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalysis {
    pub product_name: String,
    pub product_type: String,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub primary_colors: Vec<String>,
    #[serde(default)]
    pub target_audience: String,
}

impl ProductAnalysis {
    /// One-paragraph description used to seed the downstream prompts.
    pub fn summary(&self) -> String {
        let mut out = format!("{} ({})", self.product_name, self.product_type);
        if !self.materials.is_empty() {
            out.push_str(&format!(", made of {}", self.materials.join(", ")));
        }
        if !self.primary_colors.is_empty() {
            out.push_str(&format!(", in {}", self.primary_colors.join(", ")));
        }
        if !self.target_audience.is_empty() {
            out.push_str(&format!(". Target audience: {}", self.target_audience));
        }
        out
    }
}
