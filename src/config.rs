use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, StudioError};

pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const ANALYSIS_MODEL: &str = "gemini-2.5-flash";
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const TEXT_MODEL: &str = "gemini-2.5-flash";
pub const VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

/// Model ids used for each kind of request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Models {
    pub analysis: String,
    pub image: String,
    pub text: String,
    pub video: String,
}

impl Default for Models {
    fn default() -> Self {
        Self {
            analysis: ANALYSIS_MODEL.to_string(),
            image: IMAGE_MODEL.to_string(),
            text: TEXT_MODEL.to_string(),
            video: VIDEO_MODEL.to_string(),
        }
    }
}

pub const VIDEO_RESOLUTION: &str = "720p";
pub const VIDEO_ASPECT_RATIO: &str = "16:9";
pub const VIDEO_MIME_TYPE: &str = "video/mp4";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

pub const INITIAL_CREDITS: u32 = 3;
pub const BROLL_IDEA_COUNT: usize = 3;

/// Toasts kept in the session; older ones are dropped as new ones arrive.
pub const MAX_TOASTS: usize = 5;

pub const SAMPLE_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1514228742587-6b1558fcca3d?w=1024";

/// Environment variables checked, in order, for the provider API key.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Progress messages shown while a video job is polled, in rotation.
pub const VIDEO_STATUS_MESSAGES: [&str; 6] = [
    "Submitting your product to the studio...",
    "Setting up the lights and camera...",
    "Directing the scene...",
    "Rendering frames...",
    "Adding cinematic polish...",
    "Almost there, finalizing your video...",
];

/// Status message for the given poll cycle, wrapping around the list.
pub fn video_status_message(cycle: usize) -> &'static str {
    VIDEO_STATUS_MESSAGES[cycle % VIDEO_STATUS_MESSAGES.len()]
}

/// Read the provider API key from the process environment.
///
/// A `.env` file in the working directory (or a parent) is loaded first if
/// present; variables already set in the environment take precedence.
pub fn api_key_from_env() -> Result<String> {
    let _ = dotenvy::dotenv();
    API_KEY_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| {
            StudioError::Config(format!(
                "API key not set (expected one of {})",
                API_KEY_VARS.join(", ")
            ))
        })
}

pub fn default_export_dir() -> PathBuf {
    if let Some(downloads) = dirs::download_dir() {
        downloads.join("campaign-studio")
    } else {
        PathBuf::from("campaign-studio-export")
    }
}
