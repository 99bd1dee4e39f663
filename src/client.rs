//! Blocking HTTP client for the Gemini REST API.
//!
//! Implements [`Provider`] on top of `reqwest::blocking`. The underlying
//! HTTP client is built lazily on first use so constructing a
//! [`GeminiClient`] never does I/O.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config;
use crate::error::{Result, StudioError};
use crate::provider::{Download, Provider};
use crate::wire::{
    ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse, Operation,
    PredictVideoRequest,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
    client: OnceLock<Client>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: config::API_BASE.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            client: OnceLock::new(),
        }
    }

    /// Build a client from `GEMINI_API_KEY` / `API_KEY`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(config::api_key_from_env()?))
    }

    /// Override the API base URL (no trailing slash needed).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    /// Operation names are relative (`models/.../operations/...`); full URLs
    /// are passed through untouched.
    fn operation_url(&self, name: &str) -> String {
        if name.starts_with("http://") || name.starts_with("https://") {
            name.to_string()
        } else {
            format!("{}/{}", self.base_url, name.trim_start_matches('/'))
        }
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(API_KEY_HEADER, &self.api_key)
    }

    fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let resp = self.authed(builder).send()?;
        let resp = check_status(resp)?;
        Ok(resp.json()?)
    }
}

/// Turn a non-2xx response into [`StudioError::Api`], using the provider's
/// error message when the body carries one. Other bodies (proxy error pages
/// and the like) are only logged; the message falls back to the status line.
fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    let envelope_message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .ok()
        .and_then(|env| env.error)
        .map(|e| e.message)
        .filter(|m| !m.is_empty());
    let message = match envelope_message {
        Some(message) => message,
        None => {
            warn!(status = status.as_u16(), bytes = body.len(), "error response without an API error body");
            debug!(body = %body, "raw error body");
            status.to_string()
        }
    };
    Err(StudioError::Api {
        status: status.as_u16(),
        message,
    })
}

fn into_download(resp: Response) -> Result<Download> {
    let resp = check_status(resp)?;
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(';').next().unwrap_or(s).trim().to_string());
    let bytes = resp.bytes()?.to_vec();
    Ok(Download {
        bytes,
        content_type,
    })
}

impl Provider for GeminiClient {
    fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.model_url(model, "generateContent");
        debug!(model, "generateContent");
        self.send_json(self.client()?.post(url).json(request))
    }

    fn submit_video(&self, model: &str, request: &PredictVideoRequest) -> Result<Operation> {
        let url = self.model_url(model, "predictLongRunning");
        debug!(model, "predictLongRunning");
        self.send_json(self.client()?.post(url).json(request))
    }

    fn get_operation(&self, name: &str) -> Result<Operation> {
        let url = self.operation_url(name);
        debug!(operation = name, "polling operation");
        self.send_json(self.client()?.get(url))
    }

    fn download_media(&self, uri: &str) -> Result<Download> {
        debug!(uri, "downloading media");
        let resp = self.authed(self.client()?.get(uri)).send()?;
        into_download(resp)
    }

    fn fetch(&self, url: &str) -> Result<Download> {
        debug!(url, "fetching");
        let resp = self.client()?.get(url).send()?;
        into_download(resp)
    }
}
