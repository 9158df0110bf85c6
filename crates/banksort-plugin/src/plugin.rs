use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use banksort_core::{ContainerAdapter, FeatureGate, SchedulerConfig, SortScheduler, Subscribe};
use banksort_model::{RunId, SortOrder};
use tracing::{info, instrument, warn};

use crate::{
    error::PluginError,
    notify::{CompletionNotifier, LogNotify, Notify},
    settings::{LiveSettings, PluginSettings},
};

/// The bank sorting plugin as the host sees it.
///
/// Lifecycle: `init` once, `start` to expose the sort actions, `stop` to
/// withdraw them (cancelling any sort in flight). The host forwards its bank
/// menu open/close signals to [`bank_opened`](Self::bank_opened) and
/// [`bank_closed`](Self::bank_closed).
pub struct SortBankItems {
    scheduler: SortScheduler,
    settings: Arc<LiveSettings>,
    started: AtomicBool,
}

pub struct SortBankItemsBuilder {
    adapter: Arc<dyn ContainerAdapter>,
    settings: PluginSettings,
    notify: Arc<dyn Notify>,
    config: SchedulerConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SortBankItemsBuilder {
    pub fn settings(mut self, settings: PluginSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn notify(mut self, notify: Arc<dyn Notify>) -> Self {
        self.notify = notify;
        self
    }

    pub fn config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Extra event subscriber, e.g. a log journal.
    pub fn subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Must be called inside a Tokio runtime.
    pub fn build(self) -> SortBankItems {
        let settings = Arc::new(LiveSettings::new(self.settings));

        let mut subscribers = self.subscribers;
        subscribers.push(Arc::new(CompletionNotifier::new(
            Arc::clone(&settings),
            self.notify,
        )));

        let gate: Arc<dyn FeatureGate> = settings.clone();
        let scheduler = SortScheduler::new(self.adapter, gate, self.config, subscribers);

        SortBankItems {
            scheduler,
            settings,
            started: AtomicBool::new(false),
        }
    }
}

impl SortBankItems {
    pub const NAME: &'static str = "SortBankItems";

    pub fn builder(adapter: Arc<dyn ContainerAdapter>) -> SortBankItemsBuilder {
        SortBankItemsBuilder {
            adapter,
            settings: PluginSettings::default(),
            notify: Arc::new(LogNotify),
            config: SchedulerConfig::default(),
            subscribers: Vec::new(),
        }
    }

    pub fn init(&self) {
        info!(plugin = Self::NAME, "init");
    }

    pub fn start(&self) {
        self.started.store(true, Ordering::Release);
        info!(plugin = Self::NAME, "start");
    }

    pub fn stop(&self) {
        self.started.store(false, Ordering::Release);
        self.scheduler.cancel();
        info!(plugin = Self::NAME, "stop");
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    pub fn bank_opened(&self) {
        self.scheduler.container_opened();
    }

    pub fn bank_closed(&self) {
        self.scheduler.container_closed();
    }

    pub fn sort_by_id(&self) -> Result<RunId, PluginError> {
        self.sort(SortOrder::ById)
    }

    pub fn sort_by_value(&self) -> Result<RunId, PluginError> {
        self.sort(SortOrder::ByValue)
    }

    #[instrument(level = "info", skip(self), fields(plugin = SortBankItems::NAME))]
    pub fn sort(&self, order: SortOrder) -> Result<RunId, PluginError> {
        if !self.is_started() {
            return Err(PluginError::NotStarted);
        }
        info!("sort by {order}");
        self.scheduler.request_sort_by(order).map_err(|e| {
            warn!(error = %e, "sort refused");
            PluginError::from(e)
        })
    }

    /// Apply settings pushed by the host.
    pub fn apply_settings(&self, settings: PluginSettings) {
        self.settings.apply(settings);
        info!(?settings, "settings updated");
    }

    /// Turn the feature on or off. A sort in flight is abandoned at its next step.
    pub fn set_enabled(&self, enable: bool) {
        self.settings.set_enabled(enable);
        info!(plugin = Self::NAME, enable, "feature toggled");
    }

    pub fn settings(&self) -> PluginSettings {
        self.settings.current()
    }

    pub fn scheduler(&self) -> &SortScheduler {
        &self.scheduler
    }
}
