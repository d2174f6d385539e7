pub mod aggregator;
pub mod table;

pub use aggregator::BeaconAggregator;
pub use table::{same_bssid, Sighting, StationRecord, StationTable};
