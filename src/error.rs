/// Provider message that signals an expired or revoked API key.
pub const ENTITY_NOT_FOUND: &str = "Requested entity was not found.";

/// Longest message, in characters, handed out by [`StudioError::user_message`].
pub const MAX_USER_MESSAGE_CHARS: usize = 160;

#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Empty response from {0}")]
    EmptyResponse(String),

    #[error("No image generated")]
    NoImageGenerated,

    #[error("Video generation finished without a download URI")]
    NoVideoUri,

    #[error("Video generation failed: {0}")]
    VideoFailed(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Upgrade required: {0}")]
    UpgradeRequired(String),

    #[error("Action already in progress: {0}")]
    Busy(String),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StudioError {
    /// True when the provider rejected the API key as unknown, which is how
    /// an expired key selection shows up.
    pub fn is_entity_not_found(&self) -> bool {
        match self {
            StudioError::Api { message, .. } => message.contains(ENTITY_NOT_FOUND),
            _ => self.to_string().contains(ENTITY_NOT_FOUND),
        }
    }

    /// Short message suitable for a toast notification.
    pub fn user_message(&self) -> String {
        if self.is_entity_not_found() {
            return "Your API key is no longer valid. Please select a key again.".to_string();
        }
        truncate(self.full_message())
    }

    fn full_message(&self) -> String {
        match self {
            StudioError::Http(_) => "Network error, please try again.".to_string(),
            StudioError::Json(_) => "The AI returned an unexpected response.".to_string(),
            StudioError::Api { message, .. } => message.clone(),
            StudioError::EmptyResponse(_) => "The AI returned an empty response.".to_string(),
            StudioError::NoImageGenerated => "No image generated.".to_string(),
            StudioError::NoVideoUri => "Video generation failed.".to_string(),
            StudioError::VideoFailed(msg)
            | StudioError::MissingInput(msg)
            | StudioError::UpgradeRequired(msg)
            | StudioError::Busy(msg)
            | StudioError::Config(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

fn truncate(message: String) -> String {
    if message.chars().count() <= MAX_USER_MESSAGE_CHARS {
        return message;
    }
    let mut short: String = message.chars().take(MAX_USER_MESSAGE_CHARS - 3).collect();
    short.push_str("...");
    short
}

pub type Result<T> = std::result::Result<T, StudioError>;
