//! Persistence for "prompt dismissed" timestamps.
//!
//! Components never touch storage directly; they receive a
//! [`DismissalStore`] so tests can swap in [`MemoryDismissalStore`].

use serde::{Deserialize, Serialize};
use std::cell::Cell;

pub const DEFAULT_COOLDOWN_MS: f64 = 7.0 * 24.0 * 60.0 * 60.0 * 1000.0;

pub trait DismissalStore {
    /// Epoch milliseconds of the last dismissal, if any.
    fn dismissed_at(&self) -> Option<f64>;
    fn set_dismissed_at(&self, at_ms: f64);
    fn clear(&self);
}

#[derive(Serialize, Deserialize)]
struct DismissalRecord {
    dismissed_at_ms: f64,
}

/// `localStorage`-backed store. Missing storage or a corrupt entry reads as
/// "never dismissed"; writes to missing storage are dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalStorageDismissalStore {
    key: String,
}

impl LocalStorageDismissalStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl DismissalStore for LocalStorageDismissalStore {
    fn dismissed_at(&self) -> Option<f64> {
        let store = Self::storage()?;
        let raw = store.get_item(&self.key).ok().flatten()?;
        serde_json::from_str::<DismissalRecord>(&raw)
            .ok()
            .map(|r| r.dismissed_at_ms)
    }

    fn set_dismissed_at(&self, at_ms: f64) {
        if let Some(store) = Self::storage() {
            if let Ok(s) = serde_json::to_string(&DismissalRecord {
                dismissed_at_ms: at_ms,
            }) {
                let _ = store.set_item(&self.key, &s);
            }
        }
    }

    fn clear(&self) {
        if let Some(store) = Self::storage() {
            let _ = store.remove_item(&self.key);
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryDismissalStore {
    at: Cell<Option<f64>>,
}

impl DismissalStore for MemoryDismissalStore {
    fn dismissed_at(&self) -> Option<f64> {
        self.at.get()
    }

    fn set_dismissed_at(&self, at_ms: f64) {
        self.at.set(Some(at_ms));
    }

    fn clear(&self) {
        self.at.set(None);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DismissalPolicy {
    pub cooldown_ms: f64,
}

impl Default for DismissalPolicy {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
        }
    }
}

impl DismissalPolicy {
    pub fn should_prompt(&self, store: &dyn DismissalStore, now_ms: f64) -> bool {
        match store.dismissed_at() {
            None => true,
            // A timestamp from the future (clock moved back) restarts the cooldown.
            Some(at) if at > now_ms => false,
            Some(at) => now_ms - at >= self.cooldown_ms,
        }
    }

    pub fn dismiss(&self, store: &dyn DismissalStore, now_ms: f64) {
        store.set_dismissed_at(now_ms);
    }
}
