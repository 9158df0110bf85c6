use std::sync::Arc;

use async_trait::async_trait;
use banksort_core::{SortEvent, SortEventKind, Subscribe};
use tracing::info;

use crate::settings::LiveSettings;

/// Host notification and sound hooks.
#[async_trait]
pub trait Notify: Send + Sync + 'static {
    async fn sort_complete(&self);

    async fn play_sound(&self);
}

/// [`Notify`] that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotify;

#[async_trait]
impl Notify for LogNotify {
    async fn sort_complete(&self) {
        info!("bank sorted");
    }

    async fn play_sound(&self) {
        info!("bank sorted (sound)");
    }
}

/// Subscriber that turns a finished run into host notifications.
///
/// Only [`SortEventKind::RunCompleted`] triggers it, so cancelled, abandoned
/// and superseded runs stay silent.
pub struct CompletionNotifier {
    settings: Arc<LiveSettings>,
    notify: Arc<dyn Notify>,
}

impl CompletionNotifier {
    pub fn new(settings: Arc<LiveSettings>, notify: Arc<dyn Notify>) -> Self {
        Self { settings, notify }
    }
}

#[async_trait]
impl Subscribe for CompletionNotifier {
    async fn on_event(&self, event: &SortEvent) {
        if event.kind != SortEventKind::RunCompleted {
            return;
        }
        let prefs = self.settings.current();
        if prefs.notify_on_complete {
            self.notify.sort_complete().await;
        }
        if prefs.sound_on_complete {
            self.notify.play_sound().await;
        }
    }

    fn name(&self) -> &'static str {
        "completion-notifier"
    }
}
