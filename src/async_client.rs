//! Async wrapper around [`CampaignStudio`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every action on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! provider calls and the video poller sleep. The studio is shared through an
//! [`Arc`] without an outer lock, so independent actions can be awaited
//! concurrently (e.g. with `tokio::join!`).
//!
//! # Example
//!
//! ```no_run
//! use campaign_studio::{AsyncCampaignStudio, CampaignStudio};
//!
//! #[tokio::main]
//! async fn main() {
//!     let studio = AsyncCampaignStudio::build(CampaignStudio::builder()).await.unwrap();
//!     studio.load_sample_image().await.unwrap();
//!     studio.analyze().await.unwrap();
//!
//!     let (script, ideas) = tokio::join!(studio.write_script(), studio.ideate_broll());
//!     println!("{}\n{:?}", script.unwrap(), ideas.unwrap());
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Result, StudioError};
use crate::models::{ImageData, ProductAnalysis, VideoAsset};
use crate::session::Session;
use crate::{CampaignStudio, CampaignStudioBuilder};

/// Async wrapper around [`CampaignStudio`].
#[derive(Clone)]
pub struct AsyncCampaignStudio {
    inner: Arc<CampaignStudio>,
}

impl AsyncCampaignStudio {
    pub fn new(studio: CampaignStudio) -> Self {
        Self {
            inner: Arc::new(studio),
        }
    }

    /// Build the studio on the blocking thread pool.
    pub async fn build(builder: CampaignStudioBuilder) -> Result<Self> {
        tokio::task::spawn_blocking(move || builder.build().map(Self::new))
            .await
            .map_err(|e| StudioError::Task(format!("Task join error: {e}")))?
    }

    /// Borrow the underlying blocking studio.
    pub fn studio(&self) -> &CampaignStudio {
        &self.inner
    }

    /// Run a blocking studio operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&CampaignStudio) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let studio = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&studio))
            .await
            .map_err(|e| StudioError::Task(format!("Task join error: {e}")))?
    }

    /// Session snapshot. Only takes the session lock briefly, so it is safe
    /// to call directly from async code.
    pub fn snapshot(&self) -> Session {
        self.inner.snapshot()
    }

    pub fn upload_image(&self, image: ImageData) {
        self.inner.upload_image(image);
    }

    pub async fn load_image_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.run(move |s| s.load_image_file(path)).await
    }

    pub async fn load_sample_image(&self) -> Result<()> {
        self.run(|s| s.load_sample_image()).await
    }

    pub async fn analyze(&self) -> Result<ProductAnalysis> {
        self.run(|s| s.analyze()).await
    }

    pub async fn generate_lifestyle_image(&self) -> Result<ImageData> {
        self.run(|s| s.generate_lifestyle_image()).await
    }

    pub async fn write_script(&self) -> Result<String> {
        self.run(|s| s.write_script()).await
    }

    pub async fn ideate_broll(&self) -> Result<Vec<String>> {
        self.run(|s| s.ideate_broll()).await
    }

    /// Generate the hero video. `on_status` is invoked from the blocking
    /// thread once per poll cycle.
    pub async fn generate_video<F>(&self, on_status: F) -> Result<VideoAsset>
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.run(move |s| s.generate_video(on_status)).await
    }

    pub fn new_campaign(&self) {
        self.inner.new_campaign();
    }

    pub fn confirm_upgrade(&self) {
        self.inner.confirm_upgrade();
    }
}
