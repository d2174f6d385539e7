use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::capture::frame::{FrameKind, RawFrame};
use crate::prelude::{ScanError, ScanResult};
use crate::telemetry::{ScanCounters, ScanLog};

/// Bounded multi-producer / single-consumer frame queue.
///
/// The producer side is handed to the radio callback and must never block
/// or retry; the consumer side belongs to the aggregator loop.
pub struct FrameSink;

impl FrameSink {
    pub fn bounded(
        depth: usize,
        max_frame_len: usize,
        counters: Arc<ScanCounters>,
    ) -> (FrameSinkHandle, FrameDrain) {
        let (tx, rx) = mpsc::channel(depth);
        let handle = FrameSinkHandle {
            tx,
            max_frame_len,
            counters,
            log: ScanLog::new("frame_sink"),
        };
        (handle, FrameDrain { rx })
    }
}

/// Producer handle, callable from the latency-critical capture context.
#[derive(Clone)]
pub struct FrameSinkHandle {
    tx: mpsc::Sender<RawFrame>,
    max_frame_len: usize,
    counters: Arc<ScanCounters>,
    log: ScanLog,
}

impl FrameSinkHandle {
    /// Validates and enqueues one captured frame without ever blocking.
    ///
    /// Empty and oversize payloads are rejected here so they can never
    /// reach the decoder; a full queue drops the frame and surfaces the
    /// loss through the counters.
    pub fn deliver(
        &self,
        kind: FrameKind,
        signal_dbm: i8,
        channel: u8,
        payload: Vec<u8>,
    ) -> ScanResult<()> {
        let len = payload.len();
        if len == 0 || len > self.max_frame_len {
            self.counters.frame_rejected();
            self.log
                .warn(&format!("frame payload was {} bytes, skipped", len));
            return Err(ScanError::RejectedFrame(len));
        }

        let frame = RawFrame::new(kind, signal_dbm, channel, payload);
        match self.tx.try_send(frame) {
            Ok(()) => {
                self.counters.frame_delivered();
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.counters.frame_dropped();
                self.log.warn("frame queue is full, frame dropped");
                Err(ScanError::QueueFull)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                // Consumer already shut down; the capture path outlives it
                // briefly during teardown.
                self.log.debug("frame queue closed, frame discarded");
                Err(ScanError::QueueFull)
            }
        }
    }

    pub fn max_frame_len(&self) -> usize {
        self.max_frame_len
    }
}

/// Consumer side of the queue. FIFO, one frame per await.
pub struct FrameDrain {
    rx: mpsc::Receiver<RawFrame>,
}

impl FrameDrain {
    /// Waits up to `timeout` for the next frame; `None` on expiry lets the
    /// caller check other conditions (e.g. shutdown) between waits.
    pub async fn next(&mut self, timeout: Duration) -> Option<RawFrame> {
        tokio::time::timeout(timeout, self.rx.recv())
            .await
            .ok()
            .flatten()
    }
}
