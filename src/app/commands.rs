//! Operator command alphabet.
//!
//! One byte per command on the serial link.  Any byte outside the
//! alphabet decodes to [`Command::Reset`]: the operator is treated as
//! disconnected and control is handed back to the automatic rules.

pub const OUTDOOR_ON: u8 = b'a';
pub const OUTDOOR_OFF: u8 = b'b';
pub const INDOOR_ON: u8 = b'c';
pub const INDOOR_OFF: u8 = b'd';
pub const FIRE: u8 = b'e';
pub const GAS: u8 = b'f';
pub const COOLING_ON: u8 = b'g';
pub const COOLING_OFF: u8 = b'h';

/// A decoded operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OutdoorLight(bool),
    IndoorLight(bool),
    /// Operator-declared fire.
    Fire,
    /// Operator-declared gas leak.
    Gas,
    /// Drive both fans directly; no mode flag is involved.
    Cooling(bool),
    /// Unrecognised byte: both light modes fall back to automatic.
    Reset,
}

impl Command {
    pub fn decode(byte: u8) -> Self {
        match byte {
            OUTDOOR_ON => Self::OutdoorLight(true),
            OUTDOOR_OFF => Self::OutdoorLight(false),
            INDOOR_ON => Self::IndoorLight(true),
            INDOOR_OFF => Self::IndoorLight(false),
            FIRE => Self::Fire,
            GAS => Self::Gas,
            COOLING_ON => Self::Cooling(true),
            COOLING_OFF => Self::Cooling(false),
            _ => Self::Reset,
        }
    }
}
