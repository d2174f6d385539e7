use serde::Serialize;

use crate::decode::{BeaconRecord, Security};
use crate::prelude::{ScanError, ScanResult};

/// One observed access point. Created on first validated sighting; only the
/// signal strength is rewritten afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct StationRecord {
    pub bssid: [u8; 6],
    pub ssid: String,
    pub hidden_ssid: bool,
    pub channel: u8,
    pub signal_dbm: i8,
    pub security: Security,
    pub wps: bool,
}

impl StationRecord {
    pub fn from_beacon(beacon: &BeaconRecord, signal_dbm: i8) -> Self {
        Self {
            bssid: beacon.bssid,
            ssid: beacon.ssid.clone(),
            hidden_ssid: beacon.hidden_ssid,
            channel: beacon.channel,
            signal_dbm,
            security: beacon.security,
            wps: beacon.wps,
        }
    }

    pub fn bssid_string(&self) -> String {
        let b = &self.bssid;
        format!(
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// Exact six-byte address match; an all-zero address never matches anything.
pub fn same_bssid(a: &[u8; 6], b: &[u8; 6]) -> bool {
    const NULL_BSSID: [u8; 6] = [0; 6];
    if *a == NULL_BSSID || *b == NULL_BSSID {
        return false;
    }
    a == b
}

/// Outcome of recording one sighting.
#[derive(Debug, Clone)]
pub enum Sighting {
    /// First time this address was seen; carries a snapshot of the new record.
    New(StationRecord),
    /// Known address; signal strength refreshed in place.
    Updated,
}

/// Bounded, insertion-ordered table of observed stations.
///
/// Addresses are pairwise distinct and records are never removed during a
/// session. Once full the table refuses inserts; it never overwrites.
#[derive(Debug)]
pub struct StationTable {
    records: Vec<StationRecord>,
    max_stations: usize,
}

impl StationTable {
    pub fn with_capacity(max_stations: usize) -> Self {
        Self {
            records: Vec::with_capacity(max_stations),
            max_stations,
        }
    }

    /// Records one decoded beacon sighting.
    ///
    /// The lookup always runs, even at capacity; only the insert is refused
    /// once `max_stations` records exist.
    pub fn observe(&mut self, beacon: &BeaconRecord, signal_dbm: i8) -> ScanResult<Sighting> {
        for record in self.records.iter_mut() {
            if same_bssid(&record.bssid, &beacon.bssid) {
                record.signal_dbm = signal_dbm;
                return Ok(Sighting::Updated);
            }
        }

        if self.records.len() >= self.max_stations {
            return Err(ScanError::TableFull);
        }

        let record = StationRecord::from_beacon(beacon, signal_dbm);
        self.records.push(record.clone());
        Ok(Sighting::New(record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First-seen-ordered view of the recorded stations.
    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StationRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beacon(bssid: [u8; 6], ssid: &str) -> BeaconRecord {
        BeaconRecord {
            bssid,
            ssid: ssid.to_string(),
            hidden_ssid: false,
            channel: 6,
            security: Security::Wpa2,
            wps: false,
        }
    }

    #[test]
    fn repeat_sighting_refreshes_signal_only() {
        let mut table = StationTable::with_capacity(4);
        let mut first = beacon([0xaa; 6], "lab");
        table.observe(&first, -40).unwrap();

        // A later decode may disagree on every field; only signal sticks.
        first.channel = 11;
        first.ssid = "other".to_string();
        let sighting = table.observe(&first, -60).unwrap();
        assert!(matches!(sighting, Sighting::Updated));

        assert_eq!(table.len(), 1);
        let record = &table.records()[0];
        assert_eq!(record.signal_dbm, -60);
        assert_eq!(record.channel, 6);
        assert_eq!(record.ssid, "lab");
    }

    #[test]
    fn full_table_refuses_new_address_after_lookup() {
        let mut table = StationTable::with_capacity(1);
        table.observe(&beacon([0xaa; 6], "first"), -50).unwrap();

        let rejected = table.observe(&beacon([0xbb; 6], "second"), -50);
        assert!(matches!(rejected, Err(ScanError::TableFull)));
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].ssid, "first");

        // Known addresses still update at capacity.
        let sighting = table.observe(&beacon([0xaa; 6], "first"), -70).unwrap();
        assert!(matches!(sighting, Sighting::Updated));
        assert_eq!(table.records()[0].signal_dbm, -70);
    }

    #[test]
    fn insertion_order_is_first_seen_order() {
        let mut table = StationTable::with_capacity(3);
        table.observe(&beacon([1; 6], "a"), -50).unwrap();
        table.observe(&beacon([2; 6], "b"), -50).unwrap();
        table.observe(&beacon([3; 6], "c"), -50).unwrap();
        let names: Vec<&str> = table.records().iter().map(|r| r.ssid.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn null_bssid_matches_nothing() {
        assert!(!same_bssid(&[0; 6], &[0; 6]));
        assert!(!same_bssid(&[0; 6], &[1; 6]));
        assert!(same_bssid(&[1; 6], &[1; 6]));
        assert!(!same_bssid(&[1; 6], &[2; 6]));
    }

    #[test]
    fn new_sighting_returns_snapshot() {
        let mut table = StationTable::with_capacity(2);
        let sighting = table.observe(&beacon([0xcc; 6], "snap"), -45).unwrap();
        match sighting {
            Sighting::New(record) => {
                assert_eq!(record.ssid, "snap");
                assert_eq!(record.signal_dbm, -45);
                assert_eq!(record.bssid_string(), "cc:cc:cc:cc:cc:cc");
            }
            Sighting::Updated => panic!("expected a new record"),
        }
    }
}
