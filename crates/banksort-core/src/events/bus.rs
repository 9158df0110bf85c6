use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{trace, warn};

use crate::events::{SortEvent, SortEventKind, Subscribe};

/// Non-blocking fan-out of [`SortEvent`]s to subscribers.
#[derive(Clone, Default)]
pub struct Bus {
    queues: Arc<[Queue]>,
}

struct Queue {
    name: &'static str,
    tx: mpsc::Sender<Arc<SortEvent>>,
}

impl Bus {
    /// Spawn one worker per subscriber. Must be called inside a Tokio runtime.
    pub fn new(subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let queues = subscribers
            .into_iter()
            .map(|sub| {
                let (tx, rx) = mpsc::channel(sub.queue_capacity().max(1));
                let name = sub.name();
                tokio::spawn(worker(sub, rx));
                trace!(subscriber = name, "subscriber worker spawned");
                Queue { name, tx }
            })
            .collect();
        Self { queues }
    }

    pub fn publish(&self, event: SortEvent) {
        let event = Arc::new(event);
        let mut lagging = Vec::new();
        for (i, q) in self.queues.iter().enumerate() {
            match q.tx.try_send(Arc::clone(&event)) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(subscriber = q.name, kind = ?event.kind, run = %event.run, "subscriber queue full; event dropped");
                    lagging.push(i);
                }
                Err(TrySendError::Closed(_)) => {
                    trace!(subscriber = q.name, "subscriber worker gone; event dropped");
                }
            }
        }
        for i in lagging {
            self.report_overflow(i, &event);
        }
    }

    /// Tell every other subscriber that the one at `lagging` lost `dropped`.
    /// Overflow notices that do not fit are dropped without a further notice.
    fn report_overflow(&self, lagging: usize, dropped: &SortEvent) {
        let Some(name) = self.queues.get(lagging).map(|q| q.name) else {
            return;
        };
        let notice = Arc::new(
            SortEvent::new(SortEventKind::SubscriberOverflow, dropped.run).with_reason(name),
        );
        for (i, q) in self.queues.iter().enumerate() {
            if i == lagging {
                continue;
            }
            if q.tx.try_send(Arc::clone(&notice)).is_err() {
                trace!(subscriber = q.name, lagging = name, "overflow notice dropped");
            }
        }
    }

    pub fn subscribers(&self) -> usize {
        self.queues.len()
    }
}

async fn worker(sub: Arc<dyn Subscribe>, mut rx: mpsc::Receiver<Arc<SortEvent>>) {
    while let Some(event) = rx.recv().await {
        sub.on_event(&event).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use banksort_model::RunId;
    use tokio::sync::{Notify, mpsc::UnboundedSender};

    use super::*;

    struct Forward(UnboundedSender<SortEvent>);

    #[async_trait]
    impl Subscribe for Forward {
        async fn on_event(&self, event: &SortEvent) {
            let _ = self.0.send(event.clone());
        }
        fn name(&self) -> &'static str {
            "forward"
        }
    }

    struct Stuck(Arc<Notify>);

    #[async_trait]
    impl Subscribe for Stuck {
        async fn on_event(&self, _event: &SortEvent) {
            self.0.notified().await;
        }
        fn name(&self) -> &'static str {
            "stuck"
        }
        fn queue_capacity(&self) -> usize {
            1
        }
    }

    #[tokio::test]
    async fn fans_out_in_publish_order() {
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let bus = Bus::new(vec![Arc::new(Forward(tx_a)), Arc::new(Forward(tx_b))]);
        assert_eq!(bus.subscribers(), 2);

        bus.publish(SortEvent::new(SortEventKind::RunRequested, RunId(1)));
        bus.publish(SortEvent::new(SortEventKind::RunCompleted, RunId(1)));

        for rx in [&mut rx_a, &mut rx_b] {
            assert_eq!(rx.recv().await.unwrap().kind, SortEventKind::RunRequested);
            assert_eq!(rx.recv().await.unwrap().kind, SortEventKind::RunCompleted);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stuck_subscriber_does_not_block_others() {
        let gate = Arc::new(Notify::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let bus = Bus::new(vec![Arc::new(Stuck(Arc::clone(&gate))), Arc::new(Forward(tx))]);

        for step in 0..8 {
            bus.publish(SortEvent::new(SortEventKind::Exchanged, RunId(3)).with_step(step));
        }

        for step in 0..8 {
            let event = loop {
                let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                    .await
                    .expect("forward subscriber starved")
                    .unwrap();
                if event.kind != SortEventKind::SubscriberOverflow {
                    break event;
                }
            };
            assert_eq!(event.step, Some(step));
        }
        gate.notify_waiters();
    }

    #[tokio::test(start_paused = true)]
    async fn overflow_is_reported_to_other_subscribers() {
        let gate = Arc::new(Notify::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let bus = Bus::new(vec![Arc::new(Stuck(Arc::clone(&gate))), Arc::new(Forward(tx))]);

        // The stuck queue holds one event; the second one overflows it.
        bus.publish(SortEvent::new(SortEventKind::Exchanged, RunId(5)).with_step(0));
        bus.publish(SortEvent::new(SortEventKind::Exchanged, RunId(5)).with_step(1));

        let mut seen = Vec::new();
        for _ in 0..3 {
            let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("forward subscriber starved")
                .unwrap();
            seen.push(event);
        }

        let kinds: Vec<_> = seen.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SortEventKind::Exchanged,
                SortEventKind::Exchanged,
                SortEventKind::SubscriberOverflow,
            ]
        );
        let notice = &seen[2];
        assert_eq!(notice.run, RunId(5));
        assert_eq!(notice.reason.as_deref(), Some("stuck"));
        assert!(!notice.kind.is_terminal());

        // Exactly one notice for one dropped event.
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
        gate.notify_waiters();
    }

    #[test]
    fn empty_bus_publish_is_noop() {
        let bus = Bus::default();
        bus.publish(SortEvent::new(SortEventKind::RunCancelled, RunId(9)));
        assert_eq!(bus.subscribers(), 0);
    }
}
