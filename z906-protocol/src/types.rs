//! Audio channels, inputs, and sound effects of the Z906

use crate::table;

/// One independently settable output level of the amplifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Master volume (scales all satellites)
    Main,
    /// Rear satellite pair
    Rear,
    /// Center satellite
    Center,
    /// Subwoofer
    Sub,
}

/// All channels, in status frame order
pub const CHANNELS: [Channel; 4] = [Channel::Main, Channel::Rear, Channel::Center, Channel::Sub];

impl Channel {
    /// Opcode of the parameterized set-level command for this channel
    pub fn set_opcode(self) -> u8 {
        match self {
            Channel::Main => table::set::MAIN_LEVEL,
            Channel::Rear => table::set::REAR_LEVEL,
            Channel::Center => table::set::CENTER_LEVEL,
            Channel::Sub => table::set::SUB_LEVEL,
        }
    }

    /// Index of this channel's level byte within a status frame
    pub fn status_index(self) -> usize {
        match self {
            Channel::Main => table::status::MAIN_LEVEL,
            Channel::Rear => table::status::REAR_LEVEL,
            Channel::Center => table::status::CENTER_LEVEL,
            Channel::Sub => table::status::SUB_LEVEL,
        }
    }

    /// Highest level the device accepts on this channel
    pub fn max_level(self) -> u8 {
        table::MAX_LEVEL
    }
}

/// Physical input of the amplifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    /// Input 1: 3.5 mm jack
    Analog35mm,
    /// Input 2: stereo RCA
    Rca,
    /// Input 3: first TOSLINK port
    Optical1,
    /// Input 4: second TOSLINK port
    Optical2,
    /// Input 5: coaxial S/PDIF
    Coaxial,
    /// Input 6: six-channel direct (console "AUX")
    Aux,
}

impl Input {
    /// Parse from the CURRENT_INPUT status byte
    pub fn from_status_byte(byte: u8) -> Option<Self> {
        match byte {
            table::input::INPUT_1 => Some(Input::Analog35mm),
            table::input::INPUT_2 => Some(Input::Rca),
            table::input::INPUT_3 => Some(Input::Optical1),
            table::input::INPUT_4 => Some(Input::Optical2),
            table::input::INPUT_5 => Some(Input::Coaxial),
            table::input::INPUT_6 => Some(Input::Aux),
            _ => None,
        }
    }

    /// The CURRENT_INPUT status byte for this input
    pub fn status_byte(self) -> u8 {
        match self {
            Input::Analog35mm => table::input::INPUT_1,
            Input::Rca => table::input::INPUT_2,
            Input::Optical1 => table::input::INPUT_3,
            Input::Optical2 => table::input::INPUT_4,
            Input::Coaxial => table::input::INPUT_5,
            Input::Aux => table::input::INPUT_6,
        }
    }

    /// Opcode that switches the amplifier to this input
    pub fn select_opcode(self) -> u8 {
        match self {
            Input::Analog35mm => table::cmd::SELECT_INPUT_1,
            Input::Rca => table::cmd::SELECT_INPUT_2,
            Input::Optical1 => table::cmd::SELECT_INPUT_3,
            Input::Optical2 => table::cmd::SELECT_INPUT_4,
            Input::Coaxial => table::cmd::SELECT_INPUT_5,
            Input::Aux => table::cmd::SELECT_INPUT_6,
        }
    }

    /// Index of this input's effect byte within a status frame.
    ///
    /// The amplifier stores the selected effect per input; the status
    /// frame carries all six slots.
    pub fn fx_index(self) -> usize {
        match self {
            Input::Analog35mm => table::status::FX_INPUT_1,
            Input::Rca => table::status::FX_INPUT_2,
            Input::Optical1 => table::status::FX_INPUT_3,
            Input::Optical2 => table::status::FX_INPUT_4,
            Input::Coaxial => table::status::FX_INPUT_5,
            Input::Aux => table::status::FX_INPUT_6,
        }
    }
}

/// Sound effect applied to the active input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// 3D surround upmix
    ThreeD,
    /// 4.1 (no center)
    FourOne,
    /// 2.1 (front pair + sub)
    TwoOne,
    /// No effect
    None,
}

impl Effect {
    /// Parse from a per-input FX status byte
    pub fn from_status_byte(byte: u8) -> Option<Self> {
        match byte {
            table::effect::EFFECT_3D => Some(Effect::ThreeD),
            table::effect::EFFECT_41 => Some(Effect::FourOne),
            table::effect::EFFECT_21 => Some(Effect::TwoOne),
            table::effect::EFFECT_NO => Some(Effect::None),
            _ => None,
        }
    }

    /// The FX status byte for this effect
    pub fn status_byte(self) -> u8 {
        match self {
            Effect::ThreeD => table::effect::EFFECT_3D,
            Effect::FourOne => table::effect::EFFECT_41,
            Effect::TwoOne => table::effect::EFFECT_21,
            Effect::None => table::effect::EFFECT_NO,
        }
    }

    /// Opcode that selects this effect on the active input
    pub fn select_opcode(self) -> u8 {
        match self {
            Effect::ThreeD => table::cmd::SELECT_EFFECT_3D,
            Effect::FourOne => table::cmd::SELECT_EFFECT_41,
            Effect::TwoOne => table::cmd::SELECT_EFFECT_21,
            Effect::None => table::cmd::SELECT_EFFECT_NO,
        }
    }
}
