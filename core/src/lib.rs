//! Passive 802.11 survey core.
//!
//! A producer/consumer pipeline bridging a latency-critical radio capture
//! callback to a decode/aggregate stage, with a timer-driven channel hopper
//! and a bounded, deduplicated station registry. The radio driver and the
//! beacon decoder are consumed through traits; discoveries and channel hops
//! leave through a bounded notification bus.

pub mod capture;
pub mod decode;
pub mod hop;
pub mod notify;
pub mod prelude;
pub mod radio;
pub mod survey;
pub mod telemetry;

pub use prelude::{ScanConfig, ScanError, ScanResult};
