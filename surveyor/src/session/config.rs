use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use sweepcore::prelude::ScanConfig;

use crate::radio_sim::AirwaveConfig;

/// Full survey session configuration: the core pipeline settings plus the
/// simulated airwave population.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    pub min_channel: u8,
    pub max_channel: u8,
    pub dwell_ms: u64,
    pub queue_depth: usize,
    pub max_frame_len: usize,
    pub max_stations: usize,
    pub airwaves: AirwaveConfig,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        let scan = ScanConfig::default();
        Self {
            min_channel: scan.min_channel,
            max_channel: scan.max_channel,
            dwell_ms: scan.dwell_ms,
            queue_depth: scan.queue_depth,
            max_frame_len: scan.max_frame_len,
            max_stations: scan.max_stations,
            airwaves: AirwaveConfig::default(),
        }
    }
}

impl SurveyConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading survey config {}", path_ref.display()))?;
        let config: SurveyConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing survey config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn to_scan_config(&self) -> ScanConfig {
        ScanConfig {
            min_channel: self.min_channel,
            max_channel: self.max_channel,
            dwell_ms: self.dwell_ms,
            queue_depth: self.queue_depth,
            max_frame_len: self.max_frame_len,
            max_stations: self.max_stations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_produce_a_valid_scan_config() {
        let config = SurveyConfig::default();
        config.to_scan_config().validate().unwrap();
        assert_eq!(config.max_stations, 30);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"min_channel: 1\nmax_channel: 6\ndwell_ms: 250\nairwaves:\n  station_count: 4\n")
            .unwrap();
        let path = temp.into_temp_path();
        let config = SurveyConfig::load(&path).unwrap();
        assert_eq!(config.max_channel, 6);
        assert_eq!(config.dwell_ms, 250);
        assert_eq!(config.airwaves.station_count, 4);
        // Unspecified fields keep their defaults.
        assert_eq!(config.queue_depth, 30);
    }

    #[test]
    fn malformed_yaml_is_a_startup_error() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"min_channel: [not a number\n").unwrap();
        let path = temp.into_temp_path();
        assert!(SurveyConfig::load(&path).is_err());
    }
}
