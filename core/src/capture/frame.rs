use serde::{Deserialize, Serialize};

/// Coarse frame class reported by the radio alongside each capture.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FrameKind {
    Management,
    Control,
    Data,
    Other,
}

/// One captured frame as handed off by the radio callback.
///
/// The payload is an owned buffer that moves with the frame: callback to
/// queue slot to aggregator. Dropping the frame on any exit path releases
/// the buffer, so no path has to remember an explicit free.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub kind: FrameKind,
    pub signal_dbm: i8,
    pub channel: u8,
    pub payload: Vec<u8>,
}

impl RawFrame {
    pub fn new(kind: FrameKind, signal_dbm: i8, channel: u8, payload: Vec<u8>) -> Self {
        Self {
            kind,
            signal_dbm,
            channel,
            payload,
        }
    }
}
