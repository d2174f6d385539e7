use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::capture::frame::{FrameKind, RawFrame};
use crate::capture::sink::FrameDrain;
use crate::decode::{BeaconDecoder, ManagementSubtype};
use crate::notify::{EventBus, ScanEvent};
use crate::prelude::{ScanConfig, ScanError};
use crate::survey::table::{Sighting, StationTable};
use crate::telemetry::{ScanCounters, ScanLog};

// Bounded queue wait so the loop can observe the shutdown flag.
const POLL_WAIT: Duration = Duration::from_millis(100);

const NULL_BSSID: [u8; 6] = [0; 6];

/// Single consumer turning the raw frame stream into deduplicated station
/// knowledge.
///
/// Owns the station table outright, so no locking guards it; everything the
/// rest of the system learns about stations travels as snapshots over the
/// event bus.
pub struct BeaconAggregator<D: BeaconDecoder> {
    drain: FrameDrain,
    decoder: D,
    table: StationTable,
    events: EventBus,
    counters: Arc<ScanCounters>,
    shutdown: Arc<AtomicBool>,
    log: ScanLog,
}

impl<D: BeaconDecoder> BeaconAggregator<D> {
    pub fn new(
        config: &ScanConfig,
        drain: FrameDrain,
        decoder: D,
        events: EventBus,
        counters: Arc<ScanCounters>,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            drain,
            decoder,
            table: StationTable::with_capacity(config.max_stations),
            events,
            counters,
            shutdown,
            log: ScanLog::new("aggregator"),
        }
    }

    /// Consumes frames until shutdown, then yields the final table.
    pub async fn run(mut self) -> StationTable {
        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }
            if let Some(frame) = self.drain.next(POLL_WAIT).await {
                self.process(frame);
            }
        }
        self.table
    }

    /// Handles one dequeued frame. Every failure is contained to the frame:
    /// it is logged, counted where it matters, and never retried.
    pub fn process(&mut self, frame: RawFrame) {
        // Cheap class filter before any decoding work.
        if frame.kind != FrameKind::Management {
            return;
        }

        let parsed = match self.decoder.decode_frame(&frame.payload) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.counters.decode_failure();
                self.log.error(&format!("could not parse frame: {}", err));
                return;
            }
        };

        if parsed.subtype != ManagementSubtype::Beacon {
            return;
        }

        let beacon = match self.decoder.parse_beacon(&parsed) {
            Ok(beacon) => beacon,
            Err(err) => {
                self.counters.decode_failure();
                self.log.error(&format!("could not parse beacon: {}", err));
                return;
            }
        };

        // A zero address can never be deduplicated; keep it out of the table.
        if beacon.bssid == NULL_BSSID {
            self.log.debug("beacon without bssid skipped");
            return;
        }

        match self.table.observe(&beacon, frame.signal_dbm) {
            Ok(Sighting::New(record)) => {
                self.counters.beacon_recorded();
                self.log.info(&format!(
                    "new station {} ({})",
                    record.bssid_string(),
                    if record.hidden_ssid {
                        "<hidden>"
                    } else {
                        record.ssid.as_str()
                    }
                ));
                self.events.post(ScanEvent::NewStation(record));
            }
            Ok(Sighting::Updated) => {}
            Err(ScanError::TableFull) => {
                self.counters.station_rejected();
                self.log
                    .warn("couldn't add new station: maximum number of stations recorded");
            }
            Err(err) => {
                self.log.error(&format!("station table refused sighting: {}", err));
            }
        }
    }

    pub fn table(&self) -> &StationTable {
        &self.table
    }
}
