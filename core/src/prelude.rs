use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::decode::DecodeError;

/// Startup configuration for a survey session. Read once, never re-read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub min_channel: u8,
    pub max_channel: u8,
    pub dwell_ms: u64,
    pub queue_depth: usize,
    pub max_frame_len: usize,
    pub max_stations: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_channel: 1,
            max_channel: 11,
            dwell_ms: 1000,
            queue_depth: 30,
            max_frame_len: 600,
            max_stations: 30,
        }
    }
}

impl ScanConfig {
    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }

    /// Rejects configurations the pipeline cannot run on. Fatal at startup.
    pub fn validate(&self) -> ScanResult<()> {
        if self.min_channel == 0 || self.min_channel > self.max_channel {
            return Err(ScanError::Config(format!(
                "invalid channel range {}..{}",
                self.min_channel, self.max_channel
            )));
        }
        if self.dwell_ms == 0 {
            return Err(ScanError::Config("dwell must be nonzero".into()));
        }
        if self.queue_depth == 0 || self.max_frame_len == 0 || self.max_stations == 0 {
            return Err(ScanError::Config("sizes must be nonzero".into()));
        }
        Ok(())
    }
}

/// Common error type for the survey pipeline.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error("radio failure: {0}")]
    Radio(String),
    #[error("frame queue full")]
    QueueFull,
    #[error("station table full")]
    TableFull,
    #[error("rejected frame payload of {0} bytes")]
    RejectedFrame(usize),
    #[error("decode failure: {0}")]
    Decode(#[from] DecodeError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type ScanResult<T> = Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ScanConfig::default();
        config.validate().unwrap();
        assert_eq!(config.dwell(), Duration::from_millis(1000));
    }

    #[test]
    fn inverted_channel_range_is_rejected() {
        let config = ScanConfig {
            min_channel: 6,
            max_channel: 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScanError::Config(_))));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let config = ScanConfig {
            queue_depth: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
