//! Semantic decoding of status frames.
//!
//! A [`RawStatus`] is only checksum-validated bytes; [`Status`] is the
//! fully extracted device state. Decoding is all-or-nothing: any field
//! outside its documented range rejects the whole frame.

use crate::frame::{lrc, FrameError, RawStatus, MIN_FRAME_LEN};
use crate::table;
use crate::types::{Channel, Effect, Input};

/// Decoded contents of one status frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// Master level, 0..=43
    pub main: u8,
    /// Rear satellite level, 0..=43
    pub rear: u8,
    /// Center satellite level, 0..=43
    pub center: u8,
    /// Subwoofer level, 0..=43
    pub sub: u8,
    /// Active input
    pub input: Input,
    /// Effect currently applied to the active input
    pub effect: Effect,
    /// Output muted
    pub muted: bool,
    /// Power stage running (not in standby)
    pub power_on: bool,
    /// Console firmware version bytes
    pub version: [u8; 3],
}

impl Status {
    /// Extract a status from a checksum-validated frame.
    ///
    /// Returns [`FrameError::Unknown`] for an unrecognized model, input,
    /// or effect code and [`FrameError::Corrupt`] for out-of-range values.
    /// Nothing is extracted on error.
    pub fn parse(frame: &RawStatus) -> Result<Self, FrameError> {
        if frame.byte(table::status::MODEL) != table::MODEL_STATUS {
            return Err(FrameError::Unknown);
        }

        let main = frame.byte(table::status::MAIN_LEVEL);
        let rear = frame.byte(table::status::REAR_LEVEL);
        let center = frame.byte(table::status::CENTER_LEVEL);
        let sub = frame.byte(table::status::SUB_LEVEL);
        for level in [main, rear, center, sub] {
            if level > table::MAX_LEVEL {
                return Err(FrameError::Corrupt);
            }
        }

        let input = Input::from_status_byte(frame.byte(table::status::CURRENT_INPUT))
            .ok_or(FrameError::Unknown)?;

        let muted = match frame.byte(table::status::MUTE) {
            0x00 => false,
            0x01 => true,
            _ => return Err(FrameError::Corrupt),
        };

        // The effect is stored per input; report the active input's slot
        let effect =
            Effect::from_status_byte(frame.byte(input.fx_index())).ok_or(FrameError::Unknown)?;

        let power_on = frame.byte(table::status::STANDBY) == table::STANDBY_OFF;

        let version = [
            frame.byte(table::status::VER_A),
            frame.byte(table::status::VER_B),
            frame.byte(table::status::VER_C),
        ];

        Ok(Self {
            main,
            rear,
            center,
            sub,
            input,
            effect,
            muted,
            power_on,
            version,
        })
    }

    /// Level of a given channel
    pub fn level(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Main => self.main,
            Channel::Rear => self.rear,
            Channel::Center => self.center,
            Channel::Sub => self.sub,
        }
    }

    /// Encode this status as a minimum-length frame.
    ///
    /// The inverse of [`Status::parse`] for the fields this crate models;
    /// unmodeled bytes (S/PDIF, signal, auto-standby) encode as zero. Used
    /// by tests and device simulators.
    pub fn encode(&self) -> [u8; MIN_FRAME_LEN] {
        let mut f = [0u8; MIN_FRAME_LEN];
        f[table::status::STX] = table::STX;
        f[table::status::MODEL] = table::MODEL_STATUS;
        f[table::status::LENGTH] = table::MIN_PAYLOAD_LEN;
        f[table::status::MAIN_LEVEL] = self.main;
        f[table::status::REAR_LEVEL] = self.rear;
        f[table::status::CENTER_LEVEL] = self.center;
        f[table::status::SUB_LEVEL] = self.sub;
        f[table::status::CURRENT_INPUT] = self.input.status_byte();
        f[table::status::MUTE] = self.muted as u8;
        for idx in [
            table::status::FX_INPUT_1,
            table::status::FX_INPUT_2,
            table::status::FX_INPUT_3,
            table::status::FX_INPUT_4,
            table::status::FX_INPUT_5,
            table::status::FX_INPUT_6,
        ] {
            f[idx] = table::effect::EFFECT_NO;
        }
        f[self.input.fx_index()] = self.effect.status_byte();
        f[table::status::VER_A] = self.version[0];
        f[table::status::VER_B] = self.version[1];
        f[table::status::VER_C] = self.version[2];
        f[table::status::STANDBY] = if self.power_on { table::STANDBY_OFF } else { 0x01 };
        let last = f.len() - 1;
        f[last] = lrc(&f[1..last]);
        f
    }
}
