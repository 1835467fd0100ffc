//! Fixed-size request/response frames

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    constants::{BODY_SIZE, FRAME_SIZE, HEADER_SIZE, PROTOCOL_VERSION, SERIAL_SIZE},
    error::{Error, Result},
    function::{self, Function},
    serial::SerialNumber,
};

/// One 64-byte protocol frame
///
/// # Frame Structure
///
/// ```text
/// ┌─────────┬──────────┬──────────┬──────────────────┬──────────────┬─────────┐
/// │ Version │ Function │ Reserved │ Serial (reversed)│   Payload    │ Padding │
/// │ 1 byte  │  1 byte  │ 2 bytes  │ 4 bytes, optional│ <= 52/56 B   │  zeros  │
/// │ (0x17)  │          │ (0x0000) │                  │              │         │
/// └─────────┴──────────┴──────────┴──────────────────┴──────────────┴─────────┘
/// ```
///
/// A `Frame` is always exactly [`Frame::SIZE`] bytes long.
///
/// # Examples
///
/// ```
/// use uhppote_core::{Frame, Function, SerialNumber};
///
/// let serial = SerialNumber::new(112233445).unwrap();
/// let frame = Frame::request(Function::DeviceStatus, &serial).unwrap();
///
/// assert_eq!(frame.len(), 64);
/// assert_eq!(&frame.as_bytes()[..8], &[0x17, 0x20, 0x00, 0x00, 0xe5, 0x8b, 0xb0, 0x06]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Bytes,
}

impl Frame {
    /// Frame size in bytes
    pub const SIZE: usize = FRAME_SIZE;

    /// Offset of the serial block
    pub const SERIAL_OFFSET: usize = HEADER_SIZE;

    /// Build an outbound frame
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `function` is outside `0x20..=0x82`
    /// - the payload (plus the serial block, when included) exceeds 60 bytes
    pub fn build(
        function: u8,
        serial: &SerialNumber,
        payload: &[u8],
        include_serial: bool,
    ) -> Result<Self> {
        let function = function::validate_code(function)?;

        let serial_len = if include_serial { SERIAL_SIZE } else { 0 };
        if payload.len() + serial_len > BODY_SIZE {
            return Err(Error::PayloadTooLarge {
                size: payload.len(),
                max: BODY_SIZE - serial_len,
            });
        }

        let mut buf = BytesMut::with_capacity(FRAME_SIZE);

        buf.put_u8(PROTOCOL_VERSION);
        buf.put_u8(function);
        buf.put_bytes(0, 2);

        if include_serial {
            buf.put_slice(&serial.to_bytes(true));
        }

        buf.put_slice(payload);
        buf.put_bytes(0, FRAME_SIZE - buf.len());

        Ok(Self { bytes: buf.freeze() })
    }

    /// Build a payload-less request for a known function
    pub fn request(function: Function, serial: &SerialNumber) -> Result<Self> {
        Self::build(function.into(), serial, &[], function.sends_serial())
    }

    /// Wrap received bytes, which must be exactly one frame long
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Result<Self> {
        let bytes = bytes.into();

        if bytes.len() != FRAME_SIZE {
            return Err(Error::FrameLength {
                expected: FRAME_SIZE,
                actual: bytes.len(),
            });
        }

        Ok(Self { bytes })
    }

    /// Check a response header against the request that produced it
    ///
    /// `serial` is the board's serial number when the request carried it,
    /// `None` otherwise.
    pub fn validate_response(&self, function: u8, serial: Option<&SerialNumber>) -> Result<()> {
        if self.version() != PROTOCOL_VERSION {
            return Err(Error::VersionMismatch {
                expected: PROTOCOL_VERSION,
                actual: self.version(),
            });
        }

        if self.function() != function {
            return Err(Error::FunctionMismatch {
                expected: function,
                actual: self.function(),
            });
        }

        let reserved = self.reserved();
        if reserved != [0, 0] {
            return Err(Error::ReservedNotZero { actual: reserved });
        }

        if let Some(serial) = serial {
            let expected = serial.to_bytes(true);
            let actual = self.serial_block();
            if actual != expected {
                return Err(Error::SerialMismatch { expected, actual });
            }
        }

        Ok(())
    }

    pub fn version(&self) -> u8 {
        self.bytes[0]
    }

    pub fn function(&self) -> u8 {
        self.bytes[1]
    }

    pub fn reserved(&self) -> [u8; 2] {
        [self.bytes[2], self.bytes[3]]
    }

    /// Bytes 4..8, the reversed serial number when present
    pub fn serial_block(&self) -> [u8; SERIAL_SIZE] {
        let mut block = [0u8; SERIAL_SIZE];
        block.copy_from_slice(&self.bytes[Self::SERIAL_OFFSET..Self::SERIAL_OFFSET + SERIAL_SIZE]);
        block
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Always [`Frame::SIZE`]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Lowercase hex dump of the whole frame
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("version", &format!("0x{:02x}", self.version()))
            .field("function", &format!("0x{:02x}", self.function()))
            .field("serial", &hex::encode(self.serial_block()))
            .field("bytes", &self.to_hex())
            .finish()
    }
}
