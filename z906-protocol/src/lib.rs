//! Logitech Z906 console-link wire protocol
//!
//! This crate defines the UART-based protocol spoken on the Z906's DB-15
//! console connector. The amplifier acts as a slave: the controller sends
//! one-byte (or short parameterized) commands and solicits status frames
//! with `GET_STATUS`.
//!
//! # Status frame
//!
//! ```text
//! ┌──────┬───────┬────────┬───────────────┬─────┐
//! │ STX  │ MODEL │ LENGTH │ PAYLOAD       │ LRC │
//! │ 0xAA │ 0x0A  │ 1B     │ 19B (or more) │ 1B  │
//! └──────┴───────┴────────┴───────────────┴─────┘
//! ```
//!
//! The LRC covers every byte between STX and the checksum itself. All
//! device-specific byte values live in [`table`] and are versioned there;
//! nothing above that module hard-codes wire bytes.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod frame;
pub mod status;
pub mod table;
pub mod types;

pub use command::{Command, InvalidCommand, MAX_COMMAND_LEN};
pub use frame::{lrc, FrameError, RawStatus, StatusParser, MAX_FRAME_LEN};
pub use status::Status;
pub use types::{Channel, Effect, Input, CHANNELS};
