use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ---------------------------------------------------------------------------
// ImageData
// ---------------------------------------------------------------------------

/// An image held as a base64 payload plus its MIME type.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub mime_type: String,
    /// Base64 (standard alphabet, padded) encoding of the image bytes.
    pub data: String,
}

impl ImageData {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encode raw bytes under the given MIME type.
    pub fn from_raw(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    /// `data:` URL suitable for direct use as an image source.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the payload back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(self.data.as_bytes())?)
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("mime_type", &self.mime_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// VideoAsset
// ---------------------------------------------------------------------------

/// A downloaded video, shared cheaply between session snapshots.
#[derive(Clone, PartialEq, Eq)]
pub struct VideoAsset {
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl VideoAsset {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "video/quicktime" => "mov",
            "video/webm" => "webm",
            "video/x-matroska" => "mkv",
            "video/mpeg" => "mpg",
            _ => "mp4",
        }
    }
}

impl fmt::Debug for VideoAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoAsset")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// CreativeAssets
// ---------------------------------------------------------------------------

/// Everything generated for one campaign. Each slot is set independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreativeAssets {
    pub original_image: Option<ImageData>,
    pub lifestyle_image: Option<ImageData>,
    pub tiktok_script: Option<String>,
    pub broll_ideas: Option<Vec<String>>,
    pub hero_video: Option<VideoAsset>,
}

impl CreativeAssets {
    /// True when no generated artifact is present (the original image is
    /// input, not output).
    pub fn is_empty(&self) -> bool {
        self.lifestyle_image.is_none()
            && self.tiktok_script.is_none()
            && self.broll_ideas.is_none()
            && self.hero_video.is_none()
    }
}
