//! Controller function codes

use std::fmt;

use crate::constants::{MAX_FUNCTION, MIN_FUNCTION};
use crate::error::{Error, Result};

/// Known function codes
///
/// Frames may carry any code in `0x20..=0x82`; these are the ones this
/// library decodes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Function {
    /// Poll the board for door, relay and event status
    DeviceStatus = 0x20,
}

impl Function {
    /// Whether requests for this function carry the serial number block
    pub fn sends_serial(self) -> bool {
        match self {
            Self::DeviceStatus => true,
        }
    }
}

/// Check that a raw function code is one a controller accepts
pub fn validate_code(code: u8) -> Result<u8> {
    if !(MIN_FUNCTION..=MAX_FUNCTION).contains(&code) {
        return Err(Error::InvalidFunction(code));
    }
    Ok(code)
}

impl From<Function> for u8 {
    fn from(function: Function) -> u8 {
        function as u8
    }
}

impl TryFrom<u8> for Function {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match validate_code(value)? {
            0x20 => Ok(Self::DeviceStatus),
            other => Err(Error::UnknownFunction(other)),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DeviceStatus => "DEV_STATUS",
        };
        write!(f, "{}(0x{:02x})", name, *self as u8)
    }
}
