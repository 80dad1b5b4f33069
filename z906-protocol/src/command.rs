//! Outbound command encoding.
//!
//! Most commands are a single opcode byte; absolute level sets carry one
//! operand and a trailing LRC. Range validation happens here, before any
//! byte reaches the wire.

use heapless::Vec;

use crate::frame::lrc;
use crate::status::Status;
use crate::table;
use crate::types::{Channel, Effect, Input};

/// Longest encoded command (`[opcode, operand, LRC]`)
pub const MAX_COMMAND_LEN: usize = 3;

/// Command argument outside the device's valid range.
///
/// Rejected synchronously; nothing is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidCommand;

/// A media-player intent expressed as a device command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Set a channel to an absolute level (0..=43)
    SetVolume(Channel, u8),
    /// Mute or unmute the output
    SetMute(bool),
    /// Power the amplifier stage on or off
    SetPower(bool),
    /// Switch the active input
    SelectInput(Input),
    /// Apply a sound effect to the active input
    SelectEffect(Effect),
}

impl Command {
    /// Encode this command into its wire bytes.
    ///
    /// Fails fast with [`InvalidCommand`] if an argument is out of range.
    pub fn encode(&self) -> Result<Vec<u8, MAX_COMMAND_LEN>, InvalidCommand> {
        let mut bytes = Vec::new();
        match *self {
            Command::SetVolume(channel, level) => {
                if level > channel.max_level() {
                    return Err(InvalidCommand);
                }
                let opcode = channel.set_opcode();
                let _ = bytes.push(opcode);
                let _ = bytes.push(level);
                let _ = bytes.push(lrc(&[opcode, level]));
            }
            Command::SetMute(muted) => {
                let _ = bytes.push(if muted {
                    table::cmd::MUTE_ON
                } else {
                    table::cmd::MUTE_OFF
                });
            }
            Command::SetPower(on) => {
                let _ = bytes.push(if on {
                    table::cmd::PWM_ON
                } else {
                    table::cmd::PWM_OFF
                });
            }
            Command::SelectInput(input) => {
                let _ = bytes.push(input.select_opcode());
            }
            Command::SelectEffect(effect) => {
                let _ = bytes.push(effect.select_opcode());
            }
        }
        Ok(bytes)
    }

    /// Whether a status frame reflects this command having taken effect.
    ///
    /// The protocol has no explicit acknowledgement; confirmation is the
    /// next status echoing the requested value.
    pub fn confirmed_by(&self, status: &Status) -> bool {
        match *self {
            Command::SetVolume(channel, level) => status.level(channel) == level,
            Command::SetMute(muted) => status.muted == muted,
            Command::SetPower(on) => status.power_on == on,
            Command::SelectInput(input) => status.input == input,
            Command::SelectEffect(effect) => status.effect == effect,
        }
    }
}
