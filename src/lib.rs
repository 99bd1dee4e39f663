//! Campaign Studio SDK for Rust.
//!
//! Turns a single product photo into a small marketing campaign: the photo
//! is analyzed by a hosted generative-AI service (Gemini), and the analysis
//! seeds a lifestyle photo, a hero video, a short-form script and a handful
//! of B-roll ideas. All generation happens on the provider; this crate owns
//! the session state and the request plumbing.
//!
//! # Quick start
//!
//! ```no_run
//! use campaign_studio::CampaignStudio;
//!
//! let studio = CampaignStudio::builder().build().unwrap();
//!
//! studio.load_image_file("mug.png").unwrap();
//! let analysis = studio.analyze().unwrap();
//! println!("{}", analysis.product_name);
//!
//! let script = studio.write_script().unwrap();
//! let ideas = studio.ideate_broll().unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod client;
pub mod config;
pub mod entitlement;
pub mod error;
pub mod export;
pub mod generators;
pub mod input;
pub mod models;
pub mod provider;
pub mod session;
pub mod wire;

#[cfg(feature = "async")]
pub use async_client::AsyncCampaignStudio;
pub use client::GeminiClient;
pub use entitlement::{EnvKeySelector, KeySelector, ToggleKeySelector};
pub use error::{Result, StudioError};
pub use provider::{Download, Provider};
pub use session::Session;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, info, warn};

use config::Models;
use generators::{Analyzer, BRollIdeator, LifestyleImageGenerator, ScriptWriter, VideoOrchestrator};
use models::{
    ActionKind, ImageData, Plan, ProductAnalysis, ToastKind, UpgradeReason, VideoAsset,
};
use session::Ticket;

// ---------------------------------------------------------------------------
// CampaignStudioBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CampaignStudio`].
///
/// Use [`CampaignStudio::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CampaignStudioBuilder::build).
pub struct CampaignStudioBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
    poll_interval: Duration,
    initial_credits: u32,
    models: Models,
    sample_image_url: String,
    provider: Option<Box<dyn Provider>>,
    key_selector: Option<Box<dyn KeySelector>>,
}

impl Default for CampaignStudioBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            poll_interval: config::DEFAULT_POLL_INTERVAL,
            initial_credits: config::INITIAL_CREDITS,
            models: Models::default(),
            sample_image_url: config::SAMPLE_IMAGE_URL.to_string(),
            provider: None,
            key_selector: None,
        }
    }
}

impl CampaignStudioBuilder {
    /// Set the provider API key.
    ///
    /// If not set, `GEMINI_API_KEY` (or `API_KEY`) is read from the
    /// environment when the default provider is built.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API base URL of the default provider.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the per-request HTTP timeout. Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the delay between video status checks. Defaults to 10 seconds.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the number of free analyses. Defaults to 3.
    pub fn initial_credits(mut self, credits: u32) -> Self {
        self.initial_credits = credits;
        self
    }

    pub fn models(mut self, models: Models) -> Self {
        self.models = models;
        self
    }

    pub fn sample_image_url(mut self, url: impl Into<String>) -> Self {
        self.sample_image_url = url.into();
        self
    }

    /// Use a custom provider instead of the HTTP client.
    pub fn provider(mut self, provider: impl Provider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Use a custom key selector. Defaults to [`EnvKeySelector`].
    pub fn key_selector(mut self, selector: impl KeySelector + 'static) -> Self {
        self.key_selector = Some(Box::new(selector));
        self
    }

    /// Build the studio.
    ///
    /// Fails only when no provider was supplied and no API key can be found.
    /// No network traffic happens here.
    pub fn build(self) -> Result<CampaignStudio> {
        let provider: Box<dyn Provider> = match self.provider {
            Some(p) => p,
            None => {
                let key = match self.api_key {
                    Some(k) => k,
                    None => config::api_key_from_env()?,
                };
                let mut client = GeminiClient::new(key).timeout(self.timeout);
                if let Some(url) = self.base_url {
                    client = client.base_url(url);
                }
                Box::new(client)
            }
        };
        Ok(CampaignStudio {
            provider,
            key_selector: self
                .key_selector
                .unwrap_or_else(|| Box::new(EnvKeySelector) as Box<dyn KeySelector>),
            models: self.models,
            poll_interval: self.poll_interval,
            sample_image_url: self.sample_image_url,
            session: Mutex::new(Session::new(self.initial_credits)),
        })
    }
}

// ---------------------------------------------------------------------------
// CampaignStudio
// ---------------------------------------------------------------------------

/// The application shell: owns the session state and maps each user action
/// to a provider call.
///
/// Every action follows the same shape: check preconditions and mark the
/// action in flight under the session lock, call the provider with the lock
/// released, then settle the result under the lock. Failures are recorded as
/// an error toast and also returned to the caller. Distinct actions may run
/// concurrently from different threads; starting an action that is already
/// in flight fails with [`StudioError::Busy`].
pub struct CampaignStudio {
    provider: Box<dyn Provider>,
    key_selector: Box<dyn KeySelector>,
    models: Models,
    poll_interval: Duration,
    sample_image_url: String,
    session: Mutex<Session>,
}

/// Record a rejected action as an error toast and hand the error back.
fn reject(session: &mut Session, error: StudioError) -> StudioError {
    session.push_toast(ToastKind::Error, error.user_message());
    error
}

impl CampaignStudio {
    /// Create a new builder for configuring the studio.
    pub fn builder() -> CampaignStudioBuilder {
        CampaignStudioBuilder::default()
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A copy of the whole session, for rendering.
    pub fn snapshot(&self) -> Session {
        self.session().clone()
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    pub fn models(&self) -> &Models {
        &self.models
    }

    // -- Input -------------------------------------------------------------

    /// Start a campaign from `image`, discarding any previous analysis and
    /// generated assets.
    pub fn upload_image(&self, image: ImageData) {
        info!(mime = %image.mime_type, "image uploaded");
        self.session().set_image(image);
    }

    /// Read an image file and upload it.
    pub fn load_image_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        match input::load_image_file(path) {
            Ok(image) => {
                self.upload_image(image);
                Ok(())
            }
            Err(e) => Err(reject(&mut self.session(), e)),
        }
    }

    /// Fetch the bundled sample product photo and upload it.
    pub fn load_sample_image(&self) -> Result<()> {
        match input::fetch_image(self.provider.as_ref(), &self.sample_image_url) {
            Ok(image) => {
                self.upload_image(image);
                Ok(())
            }
            Err(e) => Err(reject(&mut self.session(), e)),
        }
    }

    /// Discard the current campaign. Credits and plan are kept.
    pub fn new_campaign(&self) {
        info!("starting a new campaign");
        self.session().new_campaign();
    }

    // -- Actions -----------------------------------------------------------

    fn settle<T, F>(&self, ticket: Ticket, result: Result<T>, apply: F) -> Result<T>
    where
        T: Clone,
        F: FnOnce(&mut Session, T),
    {
        let mut session = self.session();
        match result {
            Ok(value) => {
                let applied = session.succeed(ticket, |s| apply(s, value.clone()));
                if !applied {
                    debug!(action = %ticket.kind, "discarding result from a previous campaign");
                }
                Ok(value)
            }
            Err(e) => {
                session.fail(ticket, &e);
                Err(e)
            }
        }
    }

    /// Check that an analysis exists and mark `kind` in flight.
    fn begin_with_analysis(&self, kind: ActionKind) -> Result<(Ticket, ImageData, ProductAnalysis)> {
        let mut session = self.session();
        let inputs = session
            .require_analysis()
            .map(|(image, analysis)| (image.clone(), analysis.clone()));
        let (image, analysis) = match inputs {
            Ok(v) => v,
            Err(e) => return Err(reject(&mut session, e)),
        };
        let ticket = session.begin(kind).map_err(|e| reject(&mut session, e))?;
        info!(action = %kind, "action started");
        Ok((ticket, image, analysis))
    }

    /// Analyze the uploaded image.
    ///
    /// On the free plan this needs a remaining credit; with none left the
    /// upgrade modal opens instead. Success stores the analysis and consumes
    /// one credit.
    pub fn analyze(&self) -> Result<ProductAnalysis> {
        let (ticket, image) = {
            let mut session = self.session();
            let image = match session.image().cloned() {
                Ok(image) => image,
                Err(e) => return Err(reject(&mut session, e)),
            };
            if !session.can_analyze() {
                session.open_upgrade_modal(UpgradeReason::OutOfCredits);
                return Err(StudioError::UpgradeRequired(
                    "You are out of credits. Upgrade to keep creating.".into(),
                ));
            }
            let ticket = session
                .begin(ActionKind::Analyze)
                .map_err(|e| reject(&mut session, e))?;
            (ticket, image)
        };
        info!("analyzing product");

        let result = Analyzer::new(self.provider.as_ref(), &self.models.analysis).analyze(&image);
        self.settle(ticket, result, |s, analysis| {
            s.consume_credit();
            s.push_toast(
                ToastKind::Success,
                format!("Analyzed {}", analysis.product_name),
            );
            s.analysis = Some(analysis);
        })
    }

    /// Render the product into a lifestyle photo.
    pub fn generate_lifestyle_image(&self) -> Result<ImageData> {
        let (ticket, image, analysis) = self.begin_with_analysis(ActionKind::LifestyleImage)?;
        let result = LifestyleImageGenerator::new(self.provider.as_ref(), &self.models.image)
            .generate(&image, &analysis);
        self.settle(ticket, result, |s, rendered| {
            s.assets.lifestyle_image = Some(rendered);
            s.push_toast(ToastKind::Success, "Lifestyle image ready");
        })
    }

    /// Write the short-form video script.
    pub fn write_script(&self) -> Result<String> {
        let (ticket, _, analysis) = self.begin_with_analysis(ActionKind::Script)?;
        let result = ScriptWriter::new(self.provider.as_ref(), &self.models.text).write(&analysis);
        self.settle(ticket, result, |s, script| {
            s.assets.tiktok_script = Some(script);
            s.push_toast(ToastKind::Success, "Script written");
        })
    }

    /// Generate B-roll shot ideas.
    pub fn ideate_broll(&self) -> Result<Vec<String>> {
        let (ticket, _, analysis) = self.begin_with_analysis(ActionKind::BRoll)?;
        let result =
            BRollIdeator::new(self.provider.as_ref(), &self.models.text).ideate(&analysis);
        self.settle(ticket, result, |s, ideas| {
            s.assets.broll_ideas = Some(ideas);
            s.push_toast(ToastKind::Success, "B-roll ideas ready");
        })
    }

    /// Generate the hero video, blocking until the job finishes.
    ///
    /// Requires the Pro plan: otherwise the upgrade modal opens and nothing
    /// is submitted. If no API key is selected the key prompt is opened
    /// first. Each poll cycle's status message is stored in the session and
    /// passed to `on_status`. A rejected key resets the selection and
    /// prompts again; if that prompt fails its error is toasted as well.
    pub fn generate_video<F>(&self, mut on_status: F) -> Result<VideoAsset>
    where
        F: FnMut(&str),
    {
        let (ticket, image, analysis) = {
            let mut session = self.session();
            if session.plan != Plan::Pro {
                session.open_upgrade_modal(UpgradeReason::VideoRequiresPro);
                return Err(StudioError::UpgradeRequired(
                    "Video generation is a Pro feature.".into(),
                ));
            }
            drop(session);
            self.begin_with_analysis(ActionKind::Video)?
        };

        if !self.key_selector.has_selected_key() {
            info!("no API key selected, opening key prompt");
            self.session()
                .push_toast(ToastKind::Info, "Select an API key to generate videos.");
            if let Err(e) = self.key_selector.open_select_key() {
                return self.settle(ticket, Err(e), |_, _: VideoAsset| {});
            }
        }

        let orchestrator =
            VideoOrchestrator::new(self.provider.as_ref(), &self.models.video, self.poll_interval);
        let result = orchestrator.generate(&image, &analysis, |message| {
            {
                let mut session = self.session();
                if session.is_current(&ticket) {
                    session.video_status = Some(message.to_string());
                }
            }
            on_status(message);
        });

        if let Err(e) = &result {
            if e.is_entity_not_found() {
                info!("API key rejected, prompting for a new one");
                self.key_selector.reset();
                if let Err(prompt_err) = self.key_selector.open_select_key() {
                    warn!(error = %prompt_err, "could not reopen the key prompt");
                    self.session()
                        .push_toast(ToastKind::Error, prompt_err.user_message());
                }
            }
        }

        let result = self.settle(ticket, result, |s, video| {
            s.assets.hero_video = Some(video);
            s.push_toast(ToastKind::Success, "Hero video ready");
        });
        let mut session = self.session();
        if session.is_current(&ticket) {
            session.video_status = None;
        }
        result
    }

    // -- Upgrade modal -----------------------------------------------------

    pub fn open_upgrade_modal(&self) {
        self.session().open_upgrade_modal(UpgradeReason::UserRequested);
    }

    pub fn dismiss_upgrade_modal(&self) {
        self.session().dismiss_upgrade_modal();
    }

    /// Simulate a successful upgrade to the Pro plan.
    pub fn confirm_upgrade(&self) {
        info!("upgraded to Pro");
        self.session().confirm_upgrade();
    }

    // -- Toasts and accessors ----------------------------------------------

    pub fn dismiss_toast(&self, id: u64) -> bool {
        self.session().dismiss_toast(id)
    }

    pub fn credits(&self) -> u32 {
        self.session().credits
    }

    pub fn plan(&self) -> Plan {
        self.session().plan
    }

    // -- Export ------------------------------------------------------------

    /// Write the generated assets into `dir`. Returns the files written.
    pub fn export_assets<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let assets = self.session().assets.clone();
        export::export_assets(&assets, dir)
    }

    /// Write the generated assets into the platform download directory.
    pub fn export_assets_default(&self) -> Result<Vec<PathBuf>> {
        self.export_assets(config::default_export_dir())
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CampaignStudio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.session();
        write!(
            f,
            "CampaignStudio(plan={:?}, credits={}, analyzed={}, loading=[{}])",
            session.plan,
            session.credits,
            session.analysis.is_some(),
            ActionKind::ALL
                .iter()
                .filter(|k| session.actions.is_loading(**k))
                .map(|k| k.label())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
