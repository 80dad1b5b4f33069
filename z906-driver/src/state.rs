//! Local mirror of the amplifier state.
//!
//! The mirror is mutated from exactly two places: [`DeviceState::apply`]
//! with a validated status frame, and [`DeviceState::predict`] when the
//! controller sends a command (optimistic update, tracked as unconfirmed
//! until the next authoritative frame confirms or overrides it).

use z906_protocol::{Channel, Command, Effect, Input, Status, CHANNELS};

// Unconfirmed-field bits
const UNCONFIRMED_MAIN: u8 = 1 << 0;
const UNCONFIRMED_REAR: u8 = 1 << 1;
const UNCONFIRMED_CENTER: u8 = 1 << 2;
const UNCONFIRMED_SUB: u8 = 1 << 3;
const UNCONFIRMED_MUTE: u8 = 1 << 4;
const UNCONFIRMED_POWER: u8 = 1 << 5;
const UNCONFIRMED_INPUT: u8 = 1 << 6;
const UNCONFIRMED_EFFECT: u8 = 1 << 7;

fn channel_bit(channel: Channel) -> u8 {
    match channel {
        Channel::Main => UNCONFIRMED_MAIN,
        Channel::Rear => UNCONFIRMED_REAR,
        Channel::Center => UNCONFIRMED_CENTER,
        Channel::Sub => UNCONFIRMED_SUB,
    }
}

/// Amplifier power state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Power {
    /// Power stage running
    On,
    /// Standby
    Off,
    /// No status frame received yet
    #[default]
    Unknown,
}

/// Last-known state of the amplifier
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceState {
    power: Power,
    volumes: [u8; 4],
    muted: bool,
    input: Option<Input>,
    effect: Option<Effect>,
    unconfirmed: u8,
    last_updated_ms: Option<u64>,
}

impl DeviceState {
    /// Fresh state; everything unknown until the first status frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Power state
    pub fn power(&self) -> Power {
        self.power
    }

    /// Level of a channel (meaningful once [`Self::is_known`])
    pub fn volume(&self, channel: Channel) -> u8 {
        self.volumes[channel_slot(channel)]
    }

    /// Output muted
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Active input, if ever reported or requested
    pub fn input(&self) -> Option<Input> {
        self.input
    }

    /// Effect on the active input, if ever reported or requested
    pub fn effect(&self) -> Option<Effect> {
        self.effect
    }

    /// True once at least one authoritative status frame was applied
    pub fn is_known(&self) -> bool {
        self.last_updated_ms.is_some()
    }

    /// Timestamp of the last authoritative update, for staleness checks
    pub fn last_updated_ms(&self) -> Option<u64> {
        self.last_updated_ms
    }

    /// True when no optimistic value is awaiting confirmation
    pub fn is_confirmed(&self) -> bool {
        self.unconfirmed == 0
    }

    /// Whether a specific channel's level is optimistic
    pub fn is_volume_unconfirmed(&self, channel: Channel) -> bool {
        self.unconfirmed & channel_bit(channel) != 0
    }

    /// Apply an authoritative status frame.
    ///
    /// Idempotent: applying the same status twice leaves the mirror
    /// byte-identical apart from the timestamp. Clears every unconfirmed
    /// flag; the frame either confirms or overrides optimistic values.
    pub fn apply(&mut self, status: &Status, now_ms: u64) {
        self.power = if status.power_on { Power::On } else { Power::Off };
        for channel in CHANNELS {
            self.volumes[channel_slot(channel)] = status.level(channel);
        }
        self.muted = status.muted;
        self.input = Some(status.input);
        self.effect = Some(status.effect);
        self.unconfirmed = 0;
        self.last_updated_ms = Some(now_ms);
    }

    /// Optimistically pre-apply the expected result of a command.
    ///
    /// Keeps the mirror responsive while the command is in flight; the
    /// timestamp is untouched because nothing authoritative happened.
    pub fn predict(&mut self, command: &Command) {
        match *command {
            Command::SetVolume(channel, level) => {
                self.volumes[channel_slot(channel)] = level;
                self.unconfirmed |= channel_bit(channel);
            }
            Command::SetMute(muted) => {
                self.muted = muted;
                self.unconfirmed |= UNCONFIRMED_MUTE;
            }
            Command::SetPower(on) => {
                self.power = if on { Power::On } else { Power::Off };
                self.unconfirmed |= UNCONFIRMED_POWER;
            }
            Command::SelectInput(input) => {
                self.input = Some(input);
                self.unconfirmed |= UNCONFIRMED_INPUT;
            }
            Command::SelectEffect(effect) => {
                self.effect = Some(effect);
                self.unconfirmed |= UNCONFIRMED_EFFECT;
            }
        }
    }
}

fn channel_slot(channel: Channel) -> usize {
    match channel {
        Channel::Main => 0,
        Channel::Rear => 1,
        Channel::Center => 2,
        Channel::Sub => 3,
    }
}
