use std::sync::Arc;

use tokio::sync::mpsc;

use crate::survey::table::StationRecord;
use crate::telemetry::{ScanCounters, ScanLog};

/// Events delivered to the reporting collaborator.
///
/// Station records cross the bus as owned snapshots; the live table is
/// never aliased outside the aggregator.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    ChannelChanged(u8),
    NewStation(StationRecord),
}

/// Bounded event bus shared by the hopper and the aggregator.
///
/// Posting is best-effort: a full bus drops the event and counts the loss
/// instead of ever blocking a producer. Order is preserved per producer
/// only.
#[derive(Clone)]
pub struct EventBus {
    tx: mpsc::Sender<ScanEvent>,
    counters: Arc<ScanCounters>,
    log: ScanLog,
}

impl EventBus {
    pub fn bounded(depth: usize, counters: Arc<ScanCounters>) -> (EventBus, EventStream) {
        let (tx, rx) = mpsc::channel(depth);
        let bus = EventBus {
            tx,
            counters,
            log: ScanLog::new("event_bus"),
        };
        (bus, EventStream { rx })
    }

    pub fn post(&self, event: ScanEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.counters.event_dropped();
                self.log.warn("event bus full, notification dropped");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.log.debug("event bus closed, notification discarded");
            }
        }
    }
}

/// Consumer side of the bus, owned by the reporter.
pub struct EventStream {
    rx: mpsc::Receiver<ScanEvent>,
}

impl EventStream {
    /// Resolves to `None` once every producer handle is gone.
    pub async fn next(&mut self) -> Option<ScanEvent> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_arrive_in_post_order() {
        let counters = Arc::new(ScanCounters::new());
        let (bus, mut stream) = EventBus::bounded(4, counters);

        bus.post(ScanEvent::ChannelChanged(2));
        bus.post(ScanEvent::ChannelChanged(3));
        drop(bus);

        assert!(matches!(stream.next().await, Some(ScanEvent::ChannelChanged(2))));
        assert!(matches!(stream.next().await, Some(ScanEvent::ChannelChanged(3))));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn full_bus_drops_and_counts() {
        let counters = Arc::new(ScanCounters::new());
        let (bus, mut stream) = EventBus::bounded(1, counters.clone());

        bus.post(ScanEvent::ChannelChanged(1));
        bus.post(ScanEvent::ChannelChanged(2));
        assert_eq!(counters.snapshot().events_dropped, 1);

        assert!(matches!(stream.next().await, Some(ScanEvent::ChannelChanged(1))));
    }
}
