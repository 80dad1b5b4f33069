//! Versioned constant table for the Z906 console protocol.
//!
//! Everything device-specific lives here: command opcodes, status frame
//! layout, and valid value ranges. The rest of the stack refers to these
//! constants only, so supporting a protocol revision means adding a new
//! table, not touching the state machine.
//!
//! Byte values follow the community-documented Z906 command set. The table
//! documents the full set, including opcodes the driver never issues
//! (EEPROM save, temperature query, level steps); having them named keeps
//! captured traces readable.

/// Table revision implemented by this crate.
pub const TABLE_VERSION: u8 = 1;

/// Single-byte command opcodes (controller → amplifier).
pub mod cmd {
    // Input selection. Note the non-monotonic mapping: the console
    // firmware orders these by front-panel position, not by input number.
    pub const SELECT_INPUT_1: u8 = 0x02; // 3.5 mm
    pub const SELECT_INPUT_2: u8 = 0x05; // RCA
    pub const SELECT_INPUT_3: u8 = 0x03; // Optical 1
    pub const SELECT_INPUT_4: u8 = 0x04; // Optical 2
    pub const SELECT_INPUT_5: u8 = 0x06; // Coaxial
    pub const SELECT_INPUT_6: u8 = 0x07; // Aux

    // Single-step level nudges (one detent of the console wheel)
    pub const LEVEL_MAIN_UP: u8 = 0x08;
    pub const LEVEL_MAIN_DOWN: u8 = 0x09;
    pub const LEVEL_SUB_UP: u8 = 0x0A;
    pub const LEVEL_SUB_DOWN: u8 = 0x0B;
    pub const LEVEL_CENTER_UP: u8 = 0x0C;
    pub const LEVEL_CENTER_DOWN: u8 = 0x0D;
    pub const LEVEL_REAR_UP: u8 = 0x0E;
    pub const LEVEL_REAR_DOWN: u8 = 0x0F;

    // Amplifier power stage
    pub const PWM_OFF: u8 = 0x10;
    pub const PWM_ON: u8 = 0x11;

    // Sound effect selection
    pub const SELECT_EFFECT_3D: u8 = 0x14;
    pub const SELECT_EFFECT_41: u8 = 0x15;
    pub const SELECT_EFFECT_21: u8 = 0x16;
    pub const SELECT_EFFECT_NO: u8 = 0x35;

    pub const MUTE_ON: u8 = 0x38;
    pub const MUTE_OFF: u8 = 0x39;

    // Housekeeping (documented, not issued by this driver)
    pub const EEPROM_SAVE: u8 = 0x36;
    pub const BLOCK_INPUTS: u8 = 0x22;
    pub const NO_BLOCK_INPUTS: u8 = 0x33;
    pub const RESET_PWR_UP_TIME: u8 = 0x30;

    // Requests
    pub const GET_TEMP: u8 = 0x25;
    pub const GET_INPUT_GAIN: u8 = 0x2F;
    pub const GET_PWR_UP_TIME: u8 = 0x31;
    pub const GET_STATUS: u8 = 0x34;
}

/// Parameterized "set absolute level" opcodes.
///
/// These take one operand byte (the target level) and a trailing LRC, as
/// `[opcode, level, LRC]`.
pub mod set {
    pub const MAIN_LEVEL: u8 = 0x03;
    pub const REAR_LEVEL: u8 = 0x04;
    pub const CENTER_LEVEL: u8 = 0x05;
    pub const SUB_LEVEL: u8 = 0x06;
}

/// Status frame byte indices (absolute, counting from STX).
pub mod status {
    pub const STX: usize = 0x00;
    pub const MODEL: usize = 0x01;
    pub const LENGTH: usize = 0x02;
    pub const MAIN_LEVEL: usize = 0x03;
    pub const REAR_LEVEL: usize = 0x04;
    pub const CENTER_LEVEL: usize = 0x05;
    pub const SUB_LEVEL: usize = 0x06;
    pub const CURRENT_INPUT: usize = 0x07;
    pub const MUTE: usize = 0x08;
    pub const FX_INPUT_4: usize = 0x09;
    pub const FX_INPUT_5: usize = 0x0A;
    pub const FX_INPUT_2: usize = 0x0B;
    pub const FX_INPUT_6: usize = 0x0C;
    pub const FX_INPUT_1: usize = 0x0D;
    pub const FX_INPUT_3: usize = 0x0E;
    pub const SPDIF: usize = 0x0F;
    pub const SIGNAL: usize = 0x10;
    pub const VER_A: usize = 0x11;
    pub const VER_B: usize = 0x12;
    pub const VER_C: usize = 0x13;
    pub const STANDBY: usize = 0x14;
    pub const AUTO_STANDBY: usize = 0x15;
}

/// Status frame synchronization byte.
pub const STX: u8 = 0xAA;

/// Model identifier carried in every status frame.
pub const MODEL_STATUS: u8 = 0x0A;

/// Model identifier carried in temperature report frames.
pub const MODEL_TEMP: u8 = 0x0C;

/// Minimum status payload length (LENGTH byte value).
pub const MIN_PAYLOAD_LEN: u8 = 0x13;

/// Maximum status payload length accepted before the frame is treated
/// as corrupt. Later console firmware appends bytes past AUTO_STANDBY;
/// a desynchronized stream must not be able to grow the buffer forever.
pub const MAX_PAYLOAD_LEN: u8 = 0x1C;

/// Highest settable level on any channel.
pub const MAX_LEVEL: u8 = 43;

/// Status byte reported while the power stage is on.
pub const STANDBY_OFF: u8 = 0x00;

/// Input identifiers as they appear in the CURRENT_INPUT status byte.
/// Input 6 reports as 0x06, not 0x05; 0x05 is never reported.
pub mod input {
    pub const INPUT_1: u8 = 0x00;
    pub const INPUT_2: u8 = 0x01;
    pub const INPUT_3: u8 = 0x02;
    pub const INPUT_4: u8 = 0x03;
    pub const INPUT_5: u8 = 0x04;
    pub const INPUT_6: u8 = 0x06;
}

/// Effect identifiers as they appear in the per-input FX status bytes.
pub mod effect {
    pub const EFFECT_3D: u8 = 0x00;
    pub const EFFECT_21: u8 = 0x01;
    pub const EFFECT_41: u8 = 0x02;
    pub const EFFECT_NO: u8 = 0x03;
}
