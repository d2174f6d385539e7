use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::hop::schedule::ChannelSchedule;
use crate::notify::{EventBus, ScanEvent};
use crate::prelude::{ScanConfig, ScanResult};
use crate::radio::Radio;
use crate::telemetry::{ScanCounters, ScanLog};

// A tick is a pure "time to hop" signal; two pending ticks carry no more
// information than one, so the handoff queue stays shallow.
const TICK_DEPTH: usize = 2;

/// Builds the split trigger/retune pair sharing one tick channel.
pub fn hop_pair(
    config: &ScanConfig,
    radio: Arc<dyn Radio>,
    events: EventBus,
    counters: Arc<ScanCounters>,
    shutdown: Arc<AtomicBool>,
) -> (HopTimer, ChannelHopper) {
    let (tx, rx) = mpsc::channel(TICK_DEPTH);
    let timer = HopTimer {
        period: config.dwell(),
        tx,
        shutdown,
        log: ScanLog::new("hop_timer"),
    };
    let hopper = ChannelHopper {
        rx,
        schedule: ChannelSchedule::new(config.min_channel, config.max_channel),
        radio,
        events,
        counters,
        log: ScanLog::new("hopper"),
    };
    (timer, hopper)
}

/// The "may not block" half: raises a hop signal once per dwell period and
/// does nothing else. Retuning happens on the hopper task, so the cadence
/// stays timely even when the consumer side is backlogged.
pub struct HopTimer {
    period: Duration,
    tx: mpsc::Sender<()>,
    shutdown: Arc<AtomicBool>,
    log: ScanLog,
}

impl HopTimer {
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick resolves immediately; the dwell on the starting
        // channel begins now.
        interval.tick().await;

        loop {
            interval.tick().await;
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }
            match self.tx.try_send(()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    // Retune path is behind; skipping a beat beats bursting.
                    self.log.debug("hop tick coalesced into pending signal");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => break,
            }
        }
        // Dropping the sender ends the hopper loop.
    }
}

/// The "may block" half: consumes hop signals, advances the schedule,
/// retunes the radio, and announces the hop.
pub struct ChannelHopper {
    rx: mpsc::Receiver<()>,
    schedule: ChannelSchedule,
    radio: Arc<dyn Radio>,
    events: EventBus,
    counters: Arc<ScanCounters>,
    log: ScanLog,
}

impl ChannelHopper {
    /// Runs until the timer side is dropped. A failed retune is fatal:
    /// scanning on a stale channel silently corrupts coverage.
    pub async fn run(mut self) -> ScanResult<()> {
        while self.rx.recv().await.is_some() {
            let channel = self.schedule.advance();
            self.radio.set_channel(channel)?;
            self.counters.channel_hop();
            self.log.debug(&format!("hopped to channel {}", channel));
            self.events.post(ScanEvent::ChannelChanged(channel));
        }
        Ok(())
    }
}
