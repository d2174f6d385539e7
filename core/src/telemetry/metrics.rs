use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared drop/progress counters for the survey pipeline.
///
/// Atomics rather than a lock: `frames_dropped` and `frames_rejected` are
/// bumped from the capture callback, which may never block.
#[derive(Debug, Default)]
pub struct ScanCounters {
    frames_delivered: AtomicUsize,
    frames_dropped: AtomicUsize,
    frames_rejected: AtomicUsize,
    decode_failures: AtomicUsize,
    beacons_recorded: AtomicUsize,
    stations_rejected: AtomicUsize,
    events_dropped: AtomicUsize,
    channel_hops: AtomicUsize,
}

/// Point-in-time copy of the counters, for end-of-run reporting.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CountersSnapshot {
    pub frames_delivered: usize,
    pub frames_dropped: usize,
    pub frames_rejected: usize,
    pub decode_failures: usize,
    pub beacons_recorded: usize,
    pub stations_rejected: usize,
    pub events_dropped: usize,
    pub channel_hops: usize,
}

impl ScanCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_delivered(&self) {
        self.frames_delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn frame_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn frame_rejected(&self) {
        self.frames_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn beacon_recorded(&self) {
        self.beacons_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn station_rejected(&self) {
        self.stations_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn event_dropped(&self) {
        self.events_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn channel_hop(&self) {
        self.channel_hops.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            frames_delivered: self.frames_delivered.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
            frames_rejected: self.frames_rejected.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            beacons_recorded: self.beacons_recorded.load(Ordering::Relaxed),
            stations_rejected: self.stations_rejected.load(Ordering::Relaxed),
            events_dropped: self.events_dropped.load(Ordering::Relaxed),
            channel_hops: self.channel_hops.load(Ordering::Relaxed),
        }
    }
}
