//! Request and response bodies for the Gemini REST API.
//!
//! Only the fields this crate reads or writes are modeled. Every response
//! field is optional so partial or unexpected payloads deserialize cleanly
//! and callers decide what "missing" means.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ImageData;

// ---------------------------------------------------------------------------
// generateContent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single-turn user request built from the given parts.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: None,
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn image(image: &ImageData) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
}

impl GenerationConfig {
    /// Ask for JSON output matching `schema`.
    pub fn json(schema: Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            response_modalities: None,
        }
    }

    /// Ask for image output.
    pub fn image() -> Self {
        Self {
            response_mime_type: None,
            response_schema: None,
            response_modalities: Some(vec!["IMAGE".to_string(), "TEXT".to_string()]),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
    }

    /// Concatenated text of the first candidate that carries any text.
    pub fn text(&self) -> Option<String> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .find(|text| !text.trim().is_empty())
    }

    /// First inline image in any candidate.
    pub fn first_image(&self) -> Option<ImageData> {
        self.parts()
            .filter_map(|p| p.inline_data.as_ref())
            .find(|d| !d.data.is_empty())
            .map(|d| ImageData {
                mime_type: d.mime_type.clone(),
                data: d.data.clone(),
            })
    }
}

// ---------------------------------------------------------------------------
// predictLongRunning (video)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictVideoRequest {
    pub instances: Vec<VideoInstance>,
    pub parameters: VideoParameters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInstance {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<VideoImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoImage {
    pub bytes_base64_encoded: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    pub aspect_ratio: String,
    pub resolution: String,
}

/// A long-running operation as returned by submission and polling calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub response: Option<OperationResponse>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    #[serde(default)]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedSample {
    #[serde(default)]
    pub video: Option<VideoRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoRef {
    #[serde(default)]
    pub uri: Option<String>,
}

impl Operation {
    /// Download URI of the first generated video, if the job produced one.
    pub fn video_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .iter()
            .filter_map(|s| s.video.as_ref())
            .filter_map(|v| v.uri.as_deref())
            .find(|uri| !uri.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The `error` object of a failed API call or operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: Option<ApiErrorBody>,
}
