//! The single in-memory state object owned by [`CampaignStudio`](crate::CampaignStudio).
//!
//! All transitions live here as plain methods so they can be exercised
//! without a provider. The studio holds the session behind a mutex and only
//! touches it at action start and settlement.

use crate::config;
use crate::error::{Result, StudioError};
use crate::models::{
    ActionKind, ActionState, ActionStates, CreativeAssets, ImageData, Plan, ProductAnalysis,
    Toast, ToastKind, UpgradeModal, UpgradeReason,
};

/// Token handed out when an action starts and checked when it settles.
///
/// Carries the campaign epoch so a result that arrives after
/// [`Session::new_campaign`] is dropped instead of leaking into the new
/// campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub kind: ActionKind,
    epoch: u64,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub analysis: Option<ProductAnalysis>,
    pub assets: CreativeAssets,
    pub actions: ActionStates,
    pub credits: u32,
    pub plan: Plan,
    pub upgrade_modal: UpgradeModal,
    pub toasts: Vec<Toast>,
    /// Latest progress message of the running video job.
    pub video_status: Option<String>,
    epoch: u64,
    next_toast_id: u64,
}

impl Session {
    pub fn new(initial_credits: u32) -> Self {
        Self {
            analysis: None,
            assets: CreativeAssets::default(),
            actions: ActionStates::default(),
            credits: initial_credits,
            plan: Plan::Free,
            upgrade_modal: UpgradeModal::Closed,
            toasts: Vec::new(),
            video_status: None,
            epoch: 0,
            next_toast_id: 1,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // -- Campaign lifecycle ------------------------------------------------

    /// Discard the current campaign. Credits, plan and toasts survive.
    pub fn new_campaign(&mut self) {
        self.epoch += 1;
        self.analysis = None;
        self.assets = CreativeAssets::default();
        self.actions = ActionStates::default();
        self.video_status = None;
        self.upgrade_modal = UpgradeModal::Closed;
    }

    /// Replace the source image. Analysis and generated assets belong to the
    /// previous image, so they are cleared.
    pub fn set_image(&mut self, image: ImageData) {
        self.new_campaign();
        self.assets.original_image = Some(image);
    }

    pub fn image(&self) -> Result<&ImageData> {
        self.assets
            .original_image
            .as_ref()
            .ok_or_else(|| StudioError::MissingInput("Please upload a product image first.".into()))
    }

    pub fn require_analysis(&self) -> Result<(&ImageData, &ProductAnalysis)> {
        let image = self.image()?;
        let analysis = self
            .analysis
            .as_ref()
            .ok_or_else(|| StudioError::MissingInput("Please analyze the product first.".into()))?;
        Ok((image, analysis))
    }

    // -- Action state machine ----------------------------------------------

    /// Move `kind` to `InFlight`. Rejects a second start while one is running.
    pub fn begin(&mut self, kind: ActionKind) -> Result<Ticket> {
        if self.actions.is_loading(kind) {
            return Err(StudioError::Busy(format!(
                "The {} is already being generated.",
                kind
            )));
        }
        self.actions.set(kind, ActionState::InFlight);
        Ok(Ticket {
            kind,
            epoch: self.epoch,
        })
    }

    /// Whether a ticket still belongs to the current campaign.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.epoch == self.epoch
    }

    /// Settle an action successfully, applying `apply` to the session.
    ///
    /// Returns `false` (and applies nothing) when the campaign changed while
    /// the action was in flight.
    pub fn succeed(&mut self, ticket: Ticket, apply: impl FnOnce(&mut Session)) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        apply(self);
        self.actions.set(ticket.kind, ActionState::Succeeded);
        true
    }

    /// Settle an action as failed and surface an error toast.
    pub fn fail(&mut self, ticket: Ticket, error: &StudioError) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        let message = error.user_message();
        self.actions
            .set(ticket.kind, ActionState::Failed(message.clone()));
        self.push_toast(ToastKind::Error, message);
        true
    }

    // -- Credits and plan --------------------------------------------------

    /// Whether the current plan allows another analysis.
    pub fn can_analyze(&self) -> bool {
        self.plan == Plan::Pro || self.credits > 0
    }

    pub fn consume_credit(&mut self) {
        self.credits = self.credits.saturating_sub(1);
    }

    pub fn open_upgrade_modal(&mut self, reason: UpgradeReason) {
        self.upgrade_modal = UpgradeModal::Open(reason);
    }

    pub fn dismiss_upgrade_modal(&mut self) {
        self.upgrade_modal = UpgradeModal::Closed;
    }

    pub fn confirm_upgrade(&mut self) {
        self.plan = Plan::Pro;
        self.upgrade_modal = UpgradeModal::Closed;
        self.push_toast(ToastKind::Success, "Welcome to Pro! Unlimited generations unlocked.");
    }

    // -- Toasts ------------------------------------------------------------

    /// Append a toast, dropping the oldest ones past [`config::MAX_TOASTS`].
    pub fn push_toast(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_toast_id;
        self.next_toast_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        if self.toasts.len() > config::MAX_TOASTS {
            let excess = self.toasts.len() - config::MAX_TOASTS;
            self.toasts.drain(..excess);
        }
        id
    }

    /// Remove a toast. Returns `false` if no toast had that id.
    pub fn dismiss_toast(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }
}
