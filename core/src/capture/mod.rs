pub mod frame;
pub mod sink;

pub use frame::{FrameKind, RawFrame};
pub use sink::{FrameDrain, FrameSink, FrameSinkHandle};
