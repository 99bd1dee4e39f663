//! API key selection for paid-tier operations.
//!
//! Video generation runs against a billed key. Hosts that let the user pick
//! a key interactively implement [`KeySelector`]; the default assumes the
//! key from the environment is always usable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Result;

pub trait KeySelector: Send + Sync {
    /// Whether a key has been chosen for paid operations.
    fn has_selected_key(&self) -> bool;

    /// Prompt the user to choose a key. Returning `Ok` is taken to mean a
    /// key was chosen; callers proceed without checking again.
    fn open_select_key(&self) -> Result<()>;

    /// Forget the current selection, e.g. after the provider rejected it.
    fn reset(&self);
}

impl<T: KeySelector + ?Sized> KeySelector for Arc<T> {
    fn has_selected_key(&self) -> bool {
        (**self).has_selected_key()
    }

    fn open_select_key(&self) -> Result<()> {
        (**self).open_select_key()
    }

    fn reset(&self) {
        (**self).reset()
    }
}

/// Key selection backed by the configured API key: always selected.
#[derive(Debug, Default)]
pub struct EnvKeySelector;

impl KeySelector for EnvKeySelector {
    fn has_selected_key(&self) -> bool {
        true
    }

    fn open_select_key(&self) -> Result<()> {
        Ok(())
    }

    fn reset(&self) {}
}

/// In-memory selection flag that flips to selected whenever the prompt is
/// opened. Useful for hosts without a real key picker.
#[derive(Debug, Default)]
pub struct ToggleKeySelector {
    selected: AtomicBool,
}

impl ToggleKeySelector {
    pub fn new(selected: bool) -> Self {
        Self {
            selected: AtomicBool::new(selected),
        }
    }
}

impl KeySelector for ToggleKeySelector {
    fn has_selected_key(&self) -> bool {
        self.selected.load(Ordering::SeqCst)
    }

    fn open_select_key(&self) -> Result<()> {
        self.selected.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn reset(&self) {
        self.selected.store(false, Ordering::SeqCst);
    }
}
