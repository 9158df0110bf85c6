//! Permutation scheduler.
//!
//! Owns at most one in-flight [`SortRun`](run) and walks its mapping one
//! placement per step, sleeping a cooldown between steps. A new request
//! cancels the pending step of the previous run before installing itself.

mod run;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use banksort_model::{RunId, SortOrder};
use rand::{SeedableRng, rngs::StdRng};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::{
    bank::ContainerAdapter,
    error::SortError,
    events::{Bus, SortEvent, SortEventKind, Subscribe},
    gate::FeatureGate,
    mapping::{self, TargetMapping},
    pacing::PacingConfig,
};

#[derive(Debug, Clone, Default)]
pub struct SchedulerConfig {
    pub pacing: PacingConfig,
    /// Seed for the cooldown jitter. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

/// Handle to the scheduler. Clones drive the same state.
#[derive(Clone)]
pub struct SortScheduler {
    shared: Arc<Shared>,
}

pub(crate) struct Shared {
    adapter: Arc<dyn ContainerAdapter>,
    gate: Arc<dyn FeatureGate>,
    pacing: PacingConfig,
    bus: Bus,
    state: Mutex<State>,
    /// Held for the whole of one step.
    stepping: Mutex<()>,
}

struct State {
    run: Option<ActiveRun>,
    /// Set by the bank opened/closed lifecycle signals.
    open: bool,
    last_run: u64,
    rng: StdRng,
}

impl State {
    fn is_current(&self, id: RunId, token: &CancellationToken) -> bool {
        !token.is_cancelled() && self.run.as_ref().is_some_and(|r| r.id == id)
    }
}

struct ActiveRun {
    id: RunId,
    token: CancellationToken,
}

impl SortScheduler {
    /// Create an idle scheduler with the bank considered closed.
    ///
    /// Subscriber workers are spawned here, so this must run inside a Tokio runtime
    /// when `subscribers` is not empty.
    pub fn new(
        adapter: Arc<dyn ContainerAdapter>,
        gate: Arc<dyn FeatureGate>,
        config: SchedulerConfig,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            shared: Arc::new(Shared {
                adapter,
                gate,
                pacing: config.pacing,
                bus: Bus::new(subscribers),
                state: Mutex::new(State {
                    run: None,
                    open: false,
                    last_run: 0,
                    rng,
                }),
                stepping: Mutex::new(()),
            }),
        }
    }

    /// Fails when a sort could not make progress right now.
    pub fn check_ready(&self) -> Result<(), SortError> {
        if !self.shared.gate.enabled() {
            return Err(SortError::Disabled);
        }
        if !self.shared.lock().open {
            return Err(SortError::BankClosed);
        }
        Ok(())
    }

    /// Snapshot the bank, build the mapping for `order` and start a run.
    #[instrument(level = "debug", skip(self))]
    pub fn request_sort_by(&self, order: SortOrder) -> Result<RunId, SortError> {
        self.check_ready()?;
        let snapshot = self.shared.adapter.snapshot();
        let mapping = mapping::build(&snapshot, order);
        debug!(
            capacity = snapshot.capacity(),
            occupied = mapping.len(),
            "target mapping built"
        );
        Ok(self.request_sort(mapping))
    }

    /// Start a run for `mapping`, superseding any run in flight.
    ///
    /// Spawns the run onto the current Tokio runtime.
    pub fn request_sort(&self, mapping: TargetMapping) -> RunId {
        let token = CancellationToken::new();
        let id = {
            let mut state = self.shared.lock();
            state.last_run += 1;
            let id = RunId(state.last_run);

            if let Some(old) = state.run.take() {
                old.token.cancel();
                debug!(run = %old.id, by = %id, "run superseded");
                self.shared.bus.publish(
                    SortEvent::new(SortEventKind::RunSuperseded, old.id)
                        .with_reason(format!("superseded by {id}")),
                );
            }

            state.run = Some(ActiveRun {
                id,
                token: token.clone(),
            });
            self.shared.bus.publish(
                SortEvent::new(SortEventKind::RunRequested, id).with_total(mapping.len()),
            );
            id
        };

        info!(run = %id, placements = mapping.len(), "sort requested");
        tokio::spawn(run::drive(Arc::clone(&self.shared), id, token, mapping));
        id
    }

    /// Cancel the run in flight, if any. No completion is reported for it.
    pub fn cancel(&self) -> bool {
        self.shared.cancel("cancelled")
    }

    pub fn container_opened(&self) {
        self.shared.lock().open = true;
        info!("bank opens");
    }

    /// Mark the bank closed and cancel the run in flight.
    pub fn container_closed(&self) {
        self.shared.lock().open = false;
        info!("bank closes");
        self.shared.cancel("bank closed");
    }

    pub fn is_open(&self) -> bool {
        self.shared.lock().open
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().run.is_some()
    }

    pub fn current_run(&self) -> Option<RunId> {
        self.shared.lock().run.as_ref().map(|r| r.id)
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel(&self, reason: &str) -> bool {
        let mut state = self.lock();
        let Some(run) = state.run.take() else {
            return false;
        };
        run.token.cancel();
        info!(run = %run.id, reason, "sort cancelled");
        self.bus
            .publish(SortEvent::new(SortEventKind::RunCancelled, run.id).with_reason(reason));
        true
    }
}
