use std::borrow::Borrow;

use banksort_core::{SortEvent, SortEventKind};
use banksort_model::RunId;
use tracing::{debug, info, trace, warn};

pub trait View {
    fn run_id(&self) -> RunId;
    fn as_reason(&self) -> &str;
    fn step(&self) -> usize;
    fn item(&self) -> u32;
    fn delay_ms(&self) -> u64;
    fn kind(&self) -> SortEventKind;
    fn slots(&self) -> Option<(usize, usize)>;
}

impl<T> View for T
where
    T: Borrow<SortEvent>,
{
    #[inline]
    fn run_id(&self) -> RunId {
        self.borrow().run
    }
    #[inline]
    fn as_reason(&self) -> &str {
        self.borrow().reason.as_deref().unwrap_or("unknown")
    }
    #[inline]
    fn step(&self) -> usize {
        self.borrow().step.unwrap_or(0)
    }
    #[inline]
    fn item(&self) -> u32 {
        self.borrow().item.map(|id| id.get()).unwrap_or(0)
    }
    #[inline]
    fn delay_ms(&self) -> u64 {
        self.borrow().delay_ms.unwrap_or(0)
    }
    #[inline]
    fn kind(&self) -> SortEventKind {
        self.borrow().kind
    }
    #[inline]
    fn slots(&self) -> Option<(usize, usize)> {
        let e = self.borrow();
        e.from.zip(e.to)
    }
}

#[inline]
pub fn message_for(kind: SortEventKind) -> &'static str {
    match kind {
        // run lifecycle
        SortEventKind::RunRequested => "sort requested",
        SortEventKind::RunSuperseded => "sort superseded by a newer request",
        SortEventKind::RunCompleted => "sort complete (no more items)",
        SortEventKind::RunCancelled => "sort cancelled",
        SortEventKind::RunAbandoned => "bank is closed or sorting disabled; sort abandoned",

        // steps
        SortEventKind::Exchanged => "swapping",
        SortEventKind::ExchangeFailed => "exchange rejected by the bank",
        SortEventKind::SkippedMissing => "item no longer in the bank; skipped",
        SortEventKind::SkippedInPlace => "item already in place; skipped",

        // bus
        SortEventKind::SubscriberOverflow => "subscriber queue full; events dropped",
    }
}

#[inline]
pub fn log_event<E: View>(e: E) {
    let msg = message_for(e.kind());
    let run = e.run_id();

    match e.kind() {
        // run lifecycle
        SortEventKind::RunRequested => debug!(run = %run, "{msg}"),
        SortEventKind::RunSuperseded => debug!(run = %run, reason = e.as_reason(), "{msg}"),
        SortEventKind::RunCompleted => info!(run = %run, steps = e.step(), "{msg}"),
        SortEventKind::RunCancelled => info!(run = %run, reason = e.as_reason(), "{msg}"),
        SortEventKind::RunAbandoned => {
            warn!(run = %run, step = e.step(), reason = e.as_reason(), "{msg}")
        }

        // steps
        SortEventKind::Exchanged => match e.slots() {
            Some((from, to)) => debug!(
                run = %run,
                step = e.step(),
                item = e.item(),
                from,
                to,
                delay_ms = e.delay_ms(),
                "{msg}"
            ),
            None => debug!(run = %run, step = e.step(), item = e.item(), "{msg}"),
        },
        SortEventKind::ExchangeFailed => warn!(
            run = %run,
            step = e.step(),
            item = e.item(),
            reason = e.as_reason(),
            "{msg}"
        ),
        SortEventKind::SkippedMissing | SortEventKind::SkippedInPlace => {
            trace!(run = %run, step = e.step(), item = e.item(), delay_ms = e.delay_ms(), "{msg}")
        }

        // bus
        SortEventKind::SubscriberOverflow => {
            warn!(run = %run, subscriber = e.as_reason(), "{msg}")
        }
    }
}

#[cfg(test)]
mod tests {
    use banksort_model::ItemId;

    use super::*;

    const ALL: [SortEventKind; 10] = [
        SortEventKind::RunRequested,
        SortEventKind::RunSuperseded,
        SortEventKind::Exchanged,
        SortEventKind::ExchangeFailed,
        SortEventKind::SkippedMissing,
        SortEventKind::SkippedInPlace,
        SortEventKind::RunCompleted,
        SortEventKind::RunCancelled,
        SortEventKind::RunAbandoned,
        SortEventKind::SubscriberOverflow,
    ];

    #[test]
    fn every_kind_has_a_message() {
        for kind in ALL {
            assert!(!message_for(kind).is_empty());
        }
    }

    #[test]
    fn view_defaults_for_missing_fields() {
        let event = SortEvent::new(SortEventKind::RunCancelled, RunId(4));
        assert_eq!(event.run_id(), RunId(4));
        assert_eq!(event.as_reason(), "unknown");
        assert_eq!(event.step(), 0);
        assert_eq!(event.slots(), None);
    }

    #[test]
    fn view_reads_move() {
        let event = SortEvent::new(SortEventKind::Exchanged, RunId(1))
            .with_step(3)
            .with_item(ItemId(995))
            .with_move(7, 3);
        assert_eq!(event.item(), 995);
        assert_eq!(event.slots(), Some((7, 3)));
    }

    #[test]
    fn logging_without_subscriber_is_harmless() {
        for kind in ALL {
            log_event(SortEvent::new(kind, RunId(2)).with_reason("test"));
        }
    }
}
