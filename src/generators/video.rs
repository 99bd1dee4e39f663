//! Hero video generation: submit a long-running job, poll it, download the
//! result.
//!
//! ```text
//! Submitted ──► Polling ──► Done
//!                  │
//!                  └──────► Failed
//! ```
//!
//! [`VideoJob::step`] performs exactly one transition, which keeps the state
//! machine testable without sleeping. [`VideoJob::run`] drives it to a
//! terminal state with a fixed delay between polls. There is no cap on the
//! number of polls and no cancellation.

use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config;
use crate::error::{Result, StudioError};
use crate::models::{ImageData, ProductAnalysis, VideoAsset};
use crate::provider::Provider;
use crate::wire::{Operation, PredictVideoRequest, VideoImage, VideoInstance, VideoParameters};

// ---------------------------------------------------------------------------
// VideoJobState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum VideoJobState {
    /// The job was accepted; holds the operation returned by submission.
    Submitted(Operation),
    /// The job is running. `cycle` counts completed status checks.
    Polling { operation: Operation, cycle: usize },
    Done(VideoAsset),
    Failed(String),
}

impl VideoJobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoJobState::Done(_) | VideoJobState::Failed(_))
    }
}

// ---------------------------------------------------------------------------
// VideoJob
// ---------------------------------------------------------------------------

pub struct VideoJob<'a> {
    provider: &'a dyn Provider,
    state: VideoJobState,
}

impl<'a> VideoJob<'a> {
    /// Resume tracking an already-submitted operation.
    pub fn new(provider: &'a dyn Provider, operation: Operation) -> Self {
        Self {
            provider,
            state: VideoJobState::Submitted(operation),
        }
    }

    pub fn state(&self) -> &VideoJobState {
        &self.state
    }

    /// Number of status checks made so far.
    pub fn cycle(&self) -> usize {
        match &self.state {
            VideoJobState::Polling { cycle, .. } => *cycle,
            _ => 0,
        }
    }

    /// Human-readable progress message for the current cycle.
    pub fn status_message(&self) -> &'static str {
        config::video_status_message(self.cycle())
    }

    /// Perform one transition. Returns `Ok(true)` once the video is
    /// downloaded. The step that fails the job returns the underlying error;
    /// stepping a failed job again returns [`StudioError::VideoFailed`].
    ///
    /// From `Submitted` the returned operation is inspected without a
    /// network call; from `Polling` the operation is re-fetched. A finished
    /// operation triggers the result download.
    pub fn step(&mut self) -> Result<bool> {
        let polled = match &self.state {
            VideoJobState::Submitted(operation) => Ok((operation.clone(), 0)),
            VideoJobState::Polling { operation, cycle } => {
                let next = *cycle + 1;
                self.provider
                    .get_operation(&operation.name)
                    .map(|op| (op, next))
            }
            VideoJobState::Done(_) => return Ok(true),
            VideoJobState::Failed(msg) => return Err(StudioError::VideoFailed(msg.clone())),
        };
        let (operation, cycle) = match polled {
            Ok(v) => v,
            Err(e) => return Err(self.fail(e)),
        };

        if !operation.done {
            debug!(operation = %operation.name, cycle, "video still rendering");
            self.state = VideoJobState::Polling { operation, cycle };
            return Ok(false);
        }

        match self.finish(&operation) {
            Ok(video) => {
                info!(bytes = video.len(), "hero video ready");
                self.state = VideoJobState::Done(video);
                Ok(true)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn finish(&self, operation: &Operation) -> Result<VideoAsset> {
        if let Some(err) = &operation.error {
            return Err(StudioError::Api {
                status: err
                    .code
                    .and_then(|c| u16::try_from(c).ok())
                    .unwrap_or(500),
                message: err.message.clone(),
            });
        }
        let uri = operation.video_uri().ok_or(StudioError::NoVideoUri)?;
        let download = self.provider.download_media(uri)?;
        let mime = download
            .content_type
            .filter(|ct| ct.starts_with("video/"))
            .unwrap_or_else(|| config::VIDEO_MIME_TYPE.to_string());
        Ok(VideoAsset::new(mime, download.bytes))
    }

    fn fail(&mut self, error: StudioError) -> StudioError {
        warn!(error = %error, "video generation failed");
        self.state = VideoJobState::Failed(error.user_message());
        error
    }

    /// Drive the job to completion, sleeping `interval` between status
    /// checks and reporting the rotating status message before each one.
    pub fn run<F>(&mut self, interval: Duration, mut on_status: F) -> Result<VideoAsset>
    where
        F: FnMut(&str),
    {
        on_status(self.status_message());
        loop {
            self.step()?;
            match &self.state {
                VideoJobState::Done(video) => return Ok(video.clone()),
                VideoJobState::Polling { cycle, .. } => {
                    if !interval.is_zero() {
                        thread::sleep(interval);
                    }
                    on_status(config::video_status_message(cycle + 1));
                }
                VideoJobState::Submitted(_) | VideoJobState::Failed(_) => {}
            }
        }
    }
}

// ---------------------------------------------------------------------------
// VideoOrchestrator
// ---------------------------------------------------------------------------

pub struct VideoOrchestrator<'a> {
    provider: &'a dyn Provider,
    model: &'a str,
    poll_interval: Duration,
}

impl<'a> VideoOrchestrator<'a> {
    pub fn new(provider: &'a dyn Provider, model: &'a str, poll_interval: Duration) -> Self {
        Self {
            provider,
            model,
            poll_interval,
        }
    }

    pub fn prompt(analysis: &ProductAnalysis) -> String {
        format!(
            "A cinematic product commercial for {}. Slow dolly-in on the product on a \
             styled surface, premium studio lighting with soft highlights, shallow depth \
             of field, gentle camera orbit, polished high-end advertising look.",
            analysis.summary()
        )
    }

    pub fn request(image: &ImageData, analysis: &ProductAnalysis) -> PredictVideoRequest {
        PredictVideoRequest {
            instances: vec![VideoInstance {
                prompt: Self::prompt(analysis),
                image: Some(VideoImage {
                    bytes_base64_encoded: image.data.clone(),
                    mime_type: image.mime_type.clone(),
                }),
            }],
            parameters: VideoParameters {
                aspect_ratio: config::VIDEO_ASPECT_RATIO.to_string(),
                resolution: config::VIDEO_RESOLUTION.to_string(),
            },
        }
    }

    /// Submit the generation job.
    pub fn submit(&self, image: &ImageData, analysis: &ProductAnalysis) -> Result<VideoJob<'a>> {
        let operation = self
            .provider
            .submit_video(self.model, &Self::request(image, analysis))?;
        info!(operation = %operation.name, "video job submitted");
        Ok(VideoJob::new(self.provider, operation))
    }

    /// Submit and poll until the video is ready.
    pub fn generate<F>(
        &self,
        image: &ImageData,
        analysis: &ProductAnalysis,
        on_status: F,
    ) -> Result<VideoAsset>
    where
        F: FnMut(&str),
    {
        let mut job = self.submit(image, analysis)?;
        job.run(self.poll_interval, on_status)
    }
}
