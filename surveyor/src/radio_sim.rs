use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use sweepcore::capture::{FrameKind, FrameSinkHandle};
use sweepcore::decode::Security;
use sweepcore::prelude::{ScanError, ScanResult};
use sweepcore::radio::{CaptureFilter, Radio};
use sweepcore::telemetry::ScanLog;

use crate::airframe::{build_beacon, BeaconTemplate};

/// Configuration for the simulated airwaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AirwaveConfig {
    pub station_count: usize,
    pub seed: u64,
    pub frame_interval_ms: u64,
}

impl Default for AirwaveConfig {
    fn default() -> Self {
        Self {
            station_count: 8,
            seed: 7,
            frame_interval_ms: 25,
        }
    }
}

const SECURITY_MIX: [Security; 6] = [
    Security::Wpa2,
    Security::Open,
    Security::Wpa,
    Security::Wpa3,
    Security::Wep,
    Security::Enterprise,
];

/// Builds a deterministic population of fake access points spread over the
/// channel range.
pub fn generate_templates(config: &AirwaveConfig, min_channel: u8, max_channel: u8) -> Vec<BeaconTemplate> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let span = (max_channel - min_channel + 1) as u64;

    (0..config.station_count)
        .map(|idx| {
            let bssid = [
                0x02, // locally administered
                0x53,
                0x57,
                (idx >> 8) as u8,
                idx as u8,
                rng.gen::<u8>(),
            ];
            let security = SECURITY_MIX[idx % SECURITY_MIX.len()];
            BeaconTemplate {
                bssid,
                ssid: format!("net-{:02}", idx),
                hidden: idx % 5 == 4,
                channel: min_channel + (idx as u64 % span) as u8,
                security,
                wps: security == Security::Wpa2 && idx % 3 == 0,
            }
        })
        .collect()
}

struct SimInner {
    sink: Mutex<Option<FrameSinkHandle>>,
    channel: AtomicU8,
    monitor: AtomicBool,
    running: AtomicBool,
    templates: Vec<BeaconTemplate>,
    frame_interval: Duration,
    seed: u64,
    log: ScanLog,
}

/// Software radio standing in for the monitor-mode driver.
///
/// While promiscuous, a background thread plays the role of the hardware
/// receive interrupt: it synthesizes frames for whatever channel is active
/// and pushes them through the registered sink exactly as a capture
/// callback would, junk and non-beacon traffic included.
pub struct SimRadio {
    inner: Arc<SimInner>,
}

impl SimRadio {
    pub fn new(config: &AirwaveConfig, min_channel: u8, max_channel: u8) -> Self {
        Self {
            inner: Arc::new(SimInner {
                sink: Mutex::new(None),
                channel: AtomicU8::new(min_channel),
                monitor: AtomicBool::new(false),
                running: AtomicBool::new(false),
                templates: generate_templates(config, min_channel, max_channel),
                frame_interval: Duration::from_millis(config.frame_interval_ms),
                seed: config.seed,
                log: ScanLog::new("sim_radio"),
            }),
        }
    }

    pub fn current_channel(&self) -> u8 {
        self.inner.channel.load(Ordering::Relaxed)
    }

    fn airwave_loop(inner: Arc<SimInner>) {
        let sink = match inner.sink.lock().unwrap().clone() {
            Some(sink) => sink,
            None => return,
        };
        let mut rng = StdRng::seed_from_u64(inner.seed.wrapping_add(1));

        while inner.running.load(Ordering::Relaxed) {
            let channel = inner.channel.load(Ordering::Relaxed);
            let roll: u8 = rng.gen_range(0..10);

            // Per-item delivery failures are the queue's business; the
            // airwaves do not care whether anyone listened.
            let _ = match roll {
                0 => {
                    // Corrupt capture: management class but truncated bytes.
                    let junk: Vec<u8> = (0..10).map(|_| rng.gen()).collect();
                    sink.deliver(FrameKind::Management, -70, channel, junk)
                }
                1 => sink.deliver(FrameKind::Data, -55, channel, vec![0x08, 0x00, 0x00, 0x00]),
                _ => {
                    let on_channel: Vec<&BeaconTemplate> = inner
                        .templates
                        .iter()
                        .filter(|t| t.channel == channel)
                        .collect();
                    match on_channel.get(rng.gen_range(0..on_channel.len().max(1))) {
                        Some(template) => {
                            let signal = -35 - (rng.gen_range(0..30) as i8);
                            sink.deliver(
                                FrameKind::Management,
                                signal,
                                channel,
                                build_beacon(template),
                            )
                        }
                        None => Ok(()),
                    }
                }
            };

            thread::sleep(inner.frame_interval);
        }
        inner.log.debug("airwave thread stopped");
    }
}

impl Radio for SimRadio {
    fn set_monitor_mode(&self) -> ScanResult<()> {
        self.inner.monitor.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn set_channel(&self, channel: u8) -> ScanResult<()> {
        if !self.inner.monitor.load(Ordering::Relaxed) {
            return Err(ScanError::Radio("monitor mode not configured".into()));
        }
        self.inner.channel.store(channel, Ordering::Relaxed);
        Ok(())
    }

    fn set_capture_filter(&self, _filter: CaptureFilter) -> ScanResult<()> {
        if !self.inner.monitor.load(Ordering::Relaxed) {
            return Err(ScanError::Radio("monitor mode not configured".into()));
        }
        Ok(())
    }

    fn set_promiscuous(&self, enabled: bool) -> ScanResult<()> {
        if !enabled {
            self.inner.running.store(false, Ordering::Relaxed);
            return Ok(());
        }
        if self.inner.sink.lock().unwrap().is_none() {
            return Err(ScanError::Radio("no frame sink registered".into()));
        }
        if self.inner.running.swap(true, Ordering::Relaxed) {
            return Ok(());
        }
        let inner = self.inner.clone();
        thread::spawn(move || SimRadio::airwave_loop(inner));
        self.inner.log.info("promiscuous capture started");
        Ok(())
    }

    fn register_frame_sink(&self, sink: FrameSinkHandle) -> ScanResult<()> {
        *self.inner.sink.lock().unwrap() = Some(sink);
        Ok(())
    }
}

impl Drop for SimRadio {
    fn drop(&mut self) {
        self.inner.running.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_population_spans_channel_range() {
        let config = AirwaveConfig {
            station_count: 11,
            ..Default::default()
        };
        let templates = generate_templates(&config, 1, 11);
        assert_eq!(templates.len(), 11);
        assert!(templates.iter().all(|t| (1..=11).contains(&t.channel)));
        // Deterministic generation per seed.
        let again = generate_templates(&config, 1, 11);
        assert_eq!(templates[3].bssid, again[3].bssid);
    }

    #[test]
    fn promiscuous_requires_registered_sink() {
        let radio = SimRadio::new(&AirwaveConfig::default(), 1, 11);
        radio.set_monitor_mode().unwrap();
        assert!(matches!(
            radio.set_promiscuous(true),
            Err(ScanError::Radio(_))
        ));
    }

    #[test]
    fn retune_requires_monitor_mode() {
        let radio = SimRadio::new(&AirwaveConfig::default(), 1, 11);
        assert!(radio.set_channel(5).is_err());
        radio.set_monitor_mode().unwrap();
        radio.set_channel(5).unwrap();
        assert_eq!(radio.current_channel(), 5);
    }
}
