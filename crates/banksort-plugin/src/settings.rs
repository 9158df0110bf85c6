use std::sync::atomic::{AtomicBool, Ordering};

use banksort_core::FeatureGate;
use serde::{Deserialize, Serialize};

use crate::error::PluginError;

/// Settings persisted by the host. Read-only from the plugin's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginSettings {
    /// Master switch. Checked on every request and every scheduler step.
    pub enable: bool,
    /// Show a notification when a sort finishes.
    pub notify_on_complete: bool,
    /// Play a sound when a sort finishes.
    pub sound_on_complete: bool,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            enable: true,
            notify_on_complete: true,
            sound_on_complete: false,
        }
    }
}

impl PluginSettings {
    pub fn from_json(raw: &str) -> Result<Self, PluginError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Current settings, shared between the plugin, the scheduler and the notifier.
#[derive(Debug, Default)]
pub struct LiveSettings {
    enable: AtomicBool,
    notify_on_complete: AtomicBool,
    sound_on_complete: AtomicBool,
}

impl LiveSettings {
    pub fn new(settings: PluginSettings) -> Self {
        let live = Self::default();
        live.apply(settings);
        live
    }

    pub fn apply(&self, settings: PluginSettings) {
        self.enable.store(settings.enable, Ordering::Release);
        self.notify_on_complete
            .store(settings.notify_on_complete, Ordering::Release);
        self.sound_on_complete
            .store(settings.sound_on_complete, Ordering::Release);
    }

    /// Flip the master switch only; the notification preferences stay.
    pub fn set_enabled(&self, enable: bool) {
        self.enable.store(enable, Ordering::Release);
    }

    pub fn current(&self) -> PluginSettings {
        PluginSettings {
            enable: self.enable.load(Ordering::Acquire),
            notify_on_complete: self.notify_on_complete.load(Ordering::Acquire),
            sound_on_complete: self.sound_on_complete.load(Ordering::Acquire),
        }
    }
}

impl FeatureGate for LiveSettings {
    fn enabled(&self) -> bool {
        self.enable.load(Ordering::Acquire)
    }
}
