use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use log::warn;

use sweepcore::capture::FrameSink;
use sweepcore::decode::BeaconDecoder;
use sweepcore::hop::hop_pair;
use sweepcore::notify::EventBus;
use sweepcore::prelude::{ScanConfig, ScanError};
use sweepcore::radio::{CaptureFilter, Radio};
use sweepcore::survey::BeaconAggregator;
use sweepcore::telemetry::ScanCounters;

use crate::session::report::{self, SessionOutcome};

const EVENT_BUS_DEPTH: usize = 32;

/// Runs one complete survey session over the given radio and decoder.
///
/// Startup mirrors the hardware bring-up sequence; any failure there aborts
/// before a single task is spawned. After that, only a failed retune can
/// end the session early.
pub async fn run_session<D>(
    config: &ScanConfig,
    radio: Arc<dyn Radio>,
    decoder: D,
    duration: Duration,
) -> anyhow::Result<SessionOutcome>
where
    D: BeaconDecoder + 'static,
{
    config.validate().context("validating configuration")?;

    let counters = Arc::new(ScanCounters::new());
    let shutdown = Arc::new(AtomicBool::new(false));
    let (sink, drain) = FrameSink::bounded(config.queue_depth, config.max_frame_len, counters.clone());
    let (events, mut stream) = EventBus::bounded(EVENT_BUS_DEPTH, counters.clone());

    radio
        .set_monitor_mode()
        .context("entering monitor mode")?;
    radio
        .set_capture_filter(CaptureFilter::MANAGEMENT)
        .context("setting capture filter")?;
    radio
        .register_frame_sink(sink)
        .context("registering frame sink")?;
    radio
        .set_channel(config.min_channel)
        .context("tuning initial channel")?;
    radio
        .set_promiscuous(true)
        .context("enabling promiscuous capture")?;

    let (timer, hopper) = hop_pair(
        config,
        radio.clone(),
        events.clone(),
        counters.clone(),
        shutdown.clone(),
    );
    let aggregator = BeaconAggregator::new(
        config,
        drain,
        decoder,
        events,
        counters.clone(),
        shutdown.clone(),
    );

    let reporter_task = tokio::spawn(async move {
        while let Some(event) = stream.next().await {
            report::announce(&event);
        }
    });
    let timer_task = tokio::spawn(timer.run());
    let mut hopper_task = tokio::spawn(hopper.run());
    let aggregator_task = tokio::spawn(aggregator.run());

    let mut hopper_done = false;
    let mut hop_failure: Option<ScanError> = None;
    tokio::select! {
        _ = tokio::time::sleep(duration) => {}
        signal = tokio::signal::ctrl_c() => {
            if let Err(err) = signal {
                warn!("ctrl-c handler failed: {}", err);
            }
        }
        joined = &mut hopper_task => {
            hopper_done = true;
            if let Err(err) = joined.context("joining channel hopper")? {
                hop_failure = Some(err);
            }
        }
    }

    shutdown.store(true, Ordering::Relaxed);
    timer_task.abort();
    if let Err(err) = radio.set_promiscuous(false) {
        warn!("disabling capture failed: {}", err);
    }

    if !hopper_done {
        hopper_task
            .await
            .context("joining channel hopper")?
            .context("channel hopper failed")?;
    }
    if let Some(err) = hop_failure {
        return Err(err).context("channel hopper failed");
    }

    let table = aggregator_task.await.context("joining aggregator")?;
    reporter_task.await.context("joining reporter")?;

    Ok(SessionOutcome {
        stations: table.into_records(),
        counters: counters.snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airframe::AirframeDecoder;
    use crate::radio_sim::{AirwaveConfig, SimRadio};

    #[tokio::test(flavor = "multi_thread")]
    async fn short_session_discovers_simulated_stations() {
        let config = ScanConfig {
            min_channel: 1,
            max_channel: 3,
            dwell_ms: 30,
            ..Default::default()
        };
        let airwaves = AirwaveConfig {
            station_count: 6,
            seed: 11,
            frame_interval_ms: 5,
        };
        let radio = Arc::new(SimRadio::new(&airwaves, 1, 3));

        let outcome = run_session(
            &config,
            radio,
            AirframeDecoder::new(),
            Duration::from_millis(400),
        )
        .await
        .unwrap();

        assert!(!outcome.stations.is_empty());
        assert!(outcome.counters.frames_delivered > 0);
        assert!(outcome.counters.channel_hops >= 1);
        // Dedup holds end to end: every recorded address is distinct.
        let mut addresses: Vec<[u8; 6]> = outcome.stations.iter().map(|s| s.bssid).collect();
        addresses.sort();
        addresses.dedup();
        assert_eq!(addresses.len(), outcome.stations.len());
    }

    #[tokio::test]
    async fn invalid_configuration_aborts_before_startup() {
        let config = ScanConfig {
            min_channel: 9,
            max_channel: 2,
            ..Default::default()
        };
        let radio = Arc::new(SimRadio::new(&AirwaveConfig::default(), 1, 11));
        let result = run_session(
            &config,
            radio,
            AirframeDecoder::new(),
            Duration::from_millis(10),
        )
        .await;
        assert!(result.is_err());
    }
}
