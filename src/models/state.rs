use std::fmt;

// ---------------------------------------------------------------------------
// ActionKind / ActionState
// ---------------------------------------------------------------------------

/// The five user-triggered actions of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Analyze,
    LifestyleImage,
    Video,
    Script,
    BRoll,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Analyze,
        ActionKind::LifestyleImage,
        ActionKind::Video,
        ActionKind::Script,
        ActionKind::BRoll,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Analyze => "analysis",
            ActionKind::LifestyleImage => "lifestyle image",
            ActionKind::Video => "hero video",
            ActionKind::Script => "script",
            ActionKind::BRoll => "B-roll ideas",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle of a single action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActionState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed(String),
}

impl ActionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ActionState::InFlight)
    }
}

/// Per-action state for all five actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionStates {
    analyze: ActionState,
    lifestyle_image: ActionState,
    video: ActionState,
    script: ActionState,
    broll: ActionState,
}

impl ActionStates {
    pub fn get(&self, kind: ActionKind) -> &ActionState {
        match kind {
            ActionKind::Analyze => &self.analyze,
            ActionKind::LifestyleImage => &self.lifestyle_image,
            ActionKind::Video => &self.video,
            ActionKind::Script => &self.script,
            ActionKind::BRoll => &self.broll,
        }
    }

    pub fn set(&mut self, kind: ActionKind, state: ActionState) {
        let slot = match kind {
            ActionKind::Analyze => &mut self.analyze,
            ActionKind::LifestyleImage => &mut self.lifestyle_image,
            ActionKind::Video => &mut self.video,
            ActionKind::Script => &mut self.script,
            ActionKind::BRoll => &mut self.broll,
        };
        *slot = state;
    }

    pub fn is_loading(&self, kind: ActionKind) -> bool {
        self.get(kind).is_loading()
    }

    pub fn any_loading(&self) -> bool {
        ActionKind::ALL.iter().any(|k| self.is_loading(*k))
    }
}

// ---------------------------------------------------------------------------
// Plan / upgrade modal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Plan {
    #[default]
    Free,
    /// Simulated unlimited entitlement.
    Pro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeReason {
    OutOfCredits,
    VideoRequiresPro,
    UserRequested,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpgradeModal {
    #[default]
    Closed,
    Open(UpgradeReason),
}

impl UpgradeModal {
    pub fn is_open(&self) -> bool {
        matches!(self, UpgradeModal::Open(_))
    }
}

// ---------------------------------------------------------------------------
// Toast
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}
