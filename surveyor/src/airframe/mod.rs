pub mod build;
pub mod parse;

pub use build::{build_beacon, BeaconTemplate};
pub use parse::AirframeDecoder;
