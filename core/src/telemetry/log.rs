use log::{debug, error, info, warn};

/// Tagged logger shared by the pipeline components.
///
/// Each component carries its own tag so interleaved output from the three
/// execution contexts stays attributable.
#[derive(Debug, Clone, Copy)]
pub struct ScanLog {
    tag: &'static str,
}

impl ScanLog {
    pub fn new(tag: &'static str) -> Self {
        Self { tag }
    }

    pub fn info(&self, message: &str) {
        info!("[{}] {}", self.tag, message);
    }

    pub fn warn(&self, message: &str) {
        warn!("[{}] {}", self.tag, message);
    }

    pub fn debug(&self, message: &str) {
        debug!("[{}] {}", self.tag, message);
    }

    pub fn error(&self, message: &str) {
        error!("[{}] {}", self.tag, message);
    }
}
