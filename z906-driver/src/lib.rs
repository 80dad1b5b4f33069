//! Cooperative driver for Logitech Z906-class 5.1 amplifiers
//!
//! Presents the amplifier as a media-player device: set volume per
//! channel, mute, power, input, and sound effect, with change callbacks
//! for the rear/center/sub channels. The driver is single-threaded and
//! non-blocking: call [`Z906Driver::poll`] from a cooperative scheduler
//! tick and every operation returns in bounded time.
//!
//! Hardware is reached only through the [`traits::SerialPort`] and
//! [`traits::Clock`] seams, so the whole driver runs unmodified against a
//! mock port on the host.

#![no_std]
#![deny(unsafe_code)]

pub mod controller;
pub mod events;
pub mod link;
pub mod state;
pub mod traits;

#[cfg(feature = "embedded-io")]
mod io;
#[cfg(feature = "embedded-io")]
pub use io::IoPort;

pub use controller::{CommandPhase, DriverConfig, DriverEvent, SubmitError, Z906Driver};
pub use events::{ChannelSnapshot, Dispatcher};
pub use link::{Link, LinkConfig, LinkStats};
pub use state::{DeviceState, Power};
pub use traits::{Clock, FnHooks, NullHooks, SerialPort, VolumeHooks};
