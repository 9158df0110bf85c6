//! Scheduler events and the subscriber bus that fans them out.

mod bus;
pub use bus::Bus;

use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use banksort_model::{ItemId, RunId, SlotIndex};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortEventKind {
    /// A new run was installed.
    RunRequested,
    /// A run was replaced by a newer request before finishing.
    RunSuperseded,
    /// One exchange was issued.
    Exchanged,
    /// The host rejected an exchange; the run goes on.
    ExchangeFailed,
    /// The item vanished from the bank since the snapshot.
    SkippedMissing,
    /// The item already sits in its target slot.
    SkippedInPlace,
    /// Every placement was visited. Published once per run, never on cancel.
    RunCompleted,
    /// The run was cancelled from outside.
    RunCancelled,
    /// A step found the feature disabled or the bank closed.
    RunAbandoned,
    /// A subscriber's queue was full and it lost an event. `reason` names the
    /// subscriber; delivered to the other subscribers only.
    SubscriberOverflow,
}

impl SortEventKind {
    /// `true` for the kinds that end a run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SortEventKind::RunSuperseded
                | SortEventKind::RunCompleted
                | SortEventKind::RunCancelled
                | SortEventKind::RunAbandoned
        )
    }
}

/// One scheduler event.
#[derive(Debug, Clone)]
pub struct SortEvent {
    pub kind: SortEventKind,
    pub run: RunId,
    /// Step cursor the event belongs to.
    pub step: Option<usize>,
    /// Number of placements in the run's mapping.
    pub total: Option<usize>,
    pub item: Option<ItemId>,
    pub from: Option<SlotIndex>,
    pub to: Option<SlotIndex>,
    /// Cooldown chosen before the next step.
    pub delay_ms: Option<u64>,
    pub reason: Option<String>,
    pub at: SystemTime,
}

impl SortEvent {
    pub fn new(kind: SortEventKind, run: RunId) -> Self {
        Self {
            kind,
            run,
            step: None,
            total: None,
            item: None,
            from: None,
            to: None,
            delay_ms: None,
            reason: None,
            at: SystemTime::now(),
        }
    }

    pub fn with_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_item(mut self, item: ItemId) -> Self {
        self.item = Some(item);
        self
    }

    pub fn with_move(mut self, from: SlotIndex, to: SlotIndex) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_ms = Some(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Event consumer.
///
/// Each subscriber gets its own bounded queue and worker; a slow subscriber
/// loses events instead of stalling the scheduler.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    async fn on_event(&self, event: &SortEvent);

    fn name(&self) -> &'static str;

    fn queue_capacity(&self) -> usize {
        1024
    }
}
