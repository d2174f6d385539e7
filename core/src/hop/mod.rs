pub mod hopper;
pub mod schedule;

pub use hopper::{hop_pair, ChannelHopper, HopTimer};
pub use schedule::ChannelSchedule;
