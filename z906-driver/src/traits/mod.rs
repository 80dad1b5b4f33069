//! Hardware and host abstraction traits
//!
//! The driver touches the outside world through exactly three seams: a
//! byte-stream peripheral, a monotonic clock, and the volume-change
//! callback sink.

mod clock;
mod hooks;
mod serial;

pub use clock::Clock;
pub use hooks::{FnHooks, NullHooks, VolumeHooks};
pub use serial::SerialPort;
