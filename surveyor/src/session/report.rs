use serde::Serialize;

use sweepcore::notify::ScanEvent;
use sweepcore::survey::StationRecord;
use sweepcore::telemetry::CountersSnapshot;

/// Final session output handed back to the caller.
#[derive(Debug, Serialize)]
pub struct SessionOutcome {
    pub stations: Vec<StationRecord>,
    pub counters: CountersSnapshot,
}

/// Live announcement of one pipeline event.
pub fn announce(event: &ScanEvent) {
    match event {
        ScanEvent::ChannelChanged(channel) => {
            println!("[survey] listening on channel {}", channel);
        }
        ScanEvent::NewStation(record) => {
            println!(
                "[survey] new station {} \"{}\" ch {} {} dBm {}",
                record.bssid_string(),
                if record.hidden_ssid {
                    "<hidden>"
                } else {
                    record.ssid.as_str()
                },
                record.channel,
                record.signal_dbm,
                record.security.label()
            );
        }
    }
}

/// Aligned station table in the legacy report layout.
pub fn print_station_table(stations: &[StationRecord]) {
    println!(
        "{:>19}{:>20}{:>10}{:>10}{:>10}{:>6}",
        "bssid", "ssid", "channel", "rssi", "auth", "wps"
    );
    for record in stations {
        let name = if record.hidden_ssid {
            "<hidden>".to_string()
        } else {
            record.ssid.chars().take(20).collect()
        };
        println!(
            "{:>19}{:>20}{:>10}{:>10}{:>10}{:>6}",
            record.bssid_string(),
            name,
            record.channel,
            record.signal_dbm,
            record.security.label(),
            if record.wps { "yes" } else { "" }
        );
    }
    println!();
}

pub fn print_counters(counters: &CountersSnapshot) {
    println!(
        "frames: {} delivered, {} dropped, {} rejected | decode failures: {} | \
         stations: {} recorded, {} refused | events dropped: {} | hops: {}",
        counters.frames_delivered,
        counters.frames_dropped,
        counters.frames_rejected,
        counters.decode_failures,
        counters.beacons_recorded,
        counters.stations_rejected,
        counters.events_dropped,
        counters.channel_hops
    );
}

pub fn to_json(outcome: &SessionOutcome) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepcore::decode::Security;

    #[test]
    fn json_report_carries_stations_and_counters() {
        let outcome = SessionOutcome {
            stations: vec![StationRecord {
                bssid: [0xaa; 6],
                ssid: "lab".to_string(),
                hidden_ssid: false,
                channel: 6,
                signal_dbm: -48,
                security: Security::Wpa2,
                wps: true,
            }],
            counters: CountersSnapshot {
                frames_delivered: 10,
                frames_dropped: 1,
                frames_rejected: 0,
                decode_failures: 2,
                beacons_recorded: 1,
                stations_rejected: 0,
                events_dropped: 0,
                channel_hops: 3,
            },
        };
        let json = to_json(&outcome).unwrap();
        assert!(json.contains("\"ssid\": \"lab\""));
        assert!(json.contains("\"channel_hops\": 3"));
    }
}
