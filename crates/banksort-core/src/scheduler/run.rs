use std::{
    sync::{Arc, PoisonError},
    time::Duration,
};

use banksort_model::{ExchangeMode, RunId};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::{
    events::{SortEvent, SortEventKind},
    mapping::TargetMapping,
    scheduler::Shared,
};

/// What the driver does after a step.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue(Duration),
    Stop,
}

/// Step loop of one run. Owns its mapping and cursor.
pub(super) async fn drive(
    shared: Arc<Shared>,
    id: RunId,
    token: CancellationToken,
    mapping: TargetMapping,
) {
    let mut step = 0usize;
    loop {
        let delay = match shared.step(id, &token, &mapping, step) {
            Flow::Continue(delay) => delay,
            Flow::Stop => return,
        };
        step += 1;

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                trace!(run = %id, step, "pending step dropped");
                return;
            }
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

impl Shared {
    /// Resolve, decide and maybe exchange for one placement.
    ///
    /// Steps of different runs never overlap: each holds the step lock for its
    /// whole duration. The state lock is only held around bookkeeping, never
    /// across gate or adapter calls, so the host may call back into the
    /// scheduler from inside `exchange`.
    fn step(
        &self,
        id: RunId,
        token: &CancellationToken,
        mapping: &TargetMapping,
        step: usize,
    ) -> Flow {
        let _serial = self.stepping.lock().unwrap_or_else(PoisonError::into_inner);
        let enabled = self.gate.enabled();

        let placement = {
            let mut state = self.lock();
            if !state.is_current(id, token) {
                // Whoever replaced or cancelled the run already reported it.
                trace!(run = %id, step, "stale step ignored");
                return Flow::Stop;
            }

            if !enabled || !state.open {
                let reason = if state.open { "disabled" } else { "bank closed" };
                state.run = None;
                warn!(run = %id, step, reason, "abandoning sort");
                self.bus.publish(
                    SortEvent::new(SortEventKind::RunAbandoned, id)
                        .with_step(step)
                        .with_reason(reason),
                );
                return Flow::Stop;
            }

            match mapping.get(step) {
                Some(placement) => placement,
                None => {
                    state.run = None;
                    info!(run = %id, steps = step, "no more items; sort complete");
                    self.bus.publish(
                        SortEvent::new(SortEventKind::RunCompleted, id)
                            .with_step(step)
                            .with_total(mapping.len()),
                    );
                    return Flow::Stop;
                }
            }
        };

        let event = |kind| {
            SortEvent::new(kind, id)
                .with_step(step)
                .with_item(placement.id)
        };

        let (event, delay) = match self.adapter.find_live_index(placement.id) {
            None => {
                trace!(run = %id, step, item = %placement.id, "item gone; skipping");
                (event(SortEventKind::SkippedMissing), self.pacing.minimal())
            }
            Some(live) if live == placement.target => {
                trace!(run = %id, step, item = %placement.id, slot = live, "already in place");
                (event(SortEventKind::SkippedInPlace), self.pacing.minimal())
            }
            Some(live) => {
                let delay = {
                    let mut state = self.lock();
                    if !state.is_current(id, token) {
                        trace!(run = %id, step, "run ended before exchange");
                        return Flow::Stop;
                    }
                    self.pacing.jittered(&mut state.rng)
                };
                debug!(run = %id, step, item = %placement.id, from = live, to = placement.target, "swapping");
                let outcome = match self
                    .adapter
                    .exchange(live, placement.target, ExchangeMode::Swap, true)
                {
                    Ok(()) => event(SortEventKind::Exchanged),
                    Err(e) => {
                        warn!(run = %id, step, item = %placement.id, error = %e, "exchange failed");
                        event(SortEventKind::ExchangeFailed).with_reason(e.to_string())
                    }
                };
                (outcome.with_move(live, placement.target), delay)
            }
        };

        let state = self.lock();
        if !state.is_current(id, token) {
            // Cancelled while the adapter ran; the terminal event is already out.
            trace!(run = %id, step, "run ended during step; event dropped");
            return Flow::Stop;
        }
        self.bus.publish(event.with_delay(delay));
        Flow::Continue(delay)
    }
}
