use crate::capture::sink::FrameSinkHandle;
use crate::prelude::ScanResult;

/// Capture filter mask handed to the radio before promiscuous mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureFilter(u32);

impl CaptureFilter {
    pub const MANAGEMENT: CaptureFilter = CaptureFilter(1);
    pub const CONTROL: CaptureFilter = CaptureFilter(1 << 1);
    pub const DATA: CaptureFilter = CaptureFilter(1 << 2);
    pub const ALL: CaptureFilter = CaptureFilter(0b111);

    pub fn union(self, other: CaptureFilter) -> CaptureFilter {
        CaptureFilter(self.0 | other.0)
    }

    pub fn accepts(&self, other: CaptureFilter) -> bool {
        self.0 & other.0 != 0
    }

    pub fn bits(&self) -> u32 {
        self.0
    }
}

/// Radio/driver boundary consumed by the pipeline.
///
/// Every operation is fallible and every failure is fatal: the pipeline has
/// no use for a radio it cannot configure, and a retune failure mid-scan
/// silently corrupts channel coverage if ignored.
pub trait Radio: Send + Sync {
    fn set_monitor_mode(&self) -> ScanResult<()>;
    fn set_channel(&self, channel: u8) -> ScanResult<()>;
    fn set_capture_filter(&self, filter: CaptureFilter) -> ScanResult<()>;
    fn set_promiscuous(&self, enabled: bool) -> ScanResult<()>;
    fn register_frame_sink(&self, sink: FrameSinkHandle) -> ScanResult<()>;
}
