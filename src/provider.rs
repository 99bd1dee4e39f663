//! The network boundary between the studio and the generative-AI service.

use crate::error::Result;
use crate::wire::{GenerateContentRequest, GenerateContentResponse, Operation, PredictVideoRequest};

/// Bytes fetched from a URL together with the reported content type.
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Operations the studio needs from a generative-AI provider.
///
/// Implementations are blocking and must be shareable across threads, since
/// independent actions may call into the same provider concurrently.
pub trait Provider: Send + Sync {
    /// Run a `generateContent` call against `model`.
    fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;

    /// Submit a long-running video generation job.
    fn submit_video(&self, model: &str, request: &PredictVideoRequest) -> Result<Operation>;

    /// Fetch the current state of a long-running operation by name.
    fn get_operation(&self, name: &str) -> Result<Operation>;

    /// Download a provider-hosted file (authenticated).
    fn download_media(&self, uri: &str) -> Result<Download>;

    /// Fetch a public URL (unauthenticated).
    fn fetch(&self, url: &str) -> Result<Download>;
}
