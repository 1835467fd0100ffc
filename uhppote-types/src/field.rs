//! Fixed-offset integer fields
//!
//! Every value in a response frame is an unsigned integer of 1 to 8 bytes at
//! a fixed offset, sometimes stored byte-reversed. A [`Field`] names one such
//! slot and [`extract_integer`] reads it; nothing else parses frame bytes.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use uhppote_core::FRAME_SIZE;

use crate::error::{Error, Result};

/// Widest field that still fits in a `u64`
pub const MAX_FIELD_LEN: usize = 8;

/// One `(offset, length, reverse)` slot in a frame
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    offset: usize,
    length: usize,
    reverse: bool,
}

impl Field {
    /// Define a field at compile time
    ///
    /// # Panics
    ///
    /// Panics (a compile error in `const` items) when the slot falls outside
    /// the readable part of a frame.
    pub const fn new(offset: usize, length: usize, reverse: bool) -> Self {
        assert!(
            is_readable(offset, length),
            "field outside the readable part of a frame"
        );
        Self {
            offset,
            length,
            reverse,
        }
    }

    /// Single byte at `offset`
    pub const fn byte(offset: usize) -> Self {
        Self::new(offset, 1, false)
    }

    /// Define a field from runtime values
    pub fn checked(offset: usize, length: usize, reverse: bool) -> Result<Self> {
        if length == 0 || length > MAX_FIELD_LEN {
            return Err(Error::InvalidLength(length));
        }
        if !is_readable(offset, length) {
            return Err(Error::InvalidRange { offset, length });
        }
        Ok(Self {
            offset,
            length,
            reverse,
        })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// Read this field from a full frame
    pub(crate) fn read(&self, frame: &[u8; FRAME_SIZE]) -> u64 {
        let src = &frame[self.offset..self.offset + self.length];
        if self.reverse {
            LittleEndian::read_uint(src, self.length)
        } else {
            BigEndian::read_uint(src, self.length)
        }
    }
}

// The last byte of a frame is never part of a field
const fn is_readable(offset: usize, length: usize) -> bool {
    offset < FRAME_SIZE && length >= 1 && length <= MAX_FIELD_LEN && offset + length < FRAME_SIZE
}

/// Read `length` bytes at `offset` as an unsigned big-endian integer,
/// reversing the bytes first when `reverse` is set
///
/// # Examples
///
/// ```
/// use uhppote_types::extract_integer;
///
/// let mut frame = [0u8; 64];
/// frame[8..12].copy_from_slice(&[0x01, 0x02, 0x00, 0x00]);
///
/// assert_eq!(extract_integer(&frame, 8, 4, true).unwrap(), 0x0201);
/// assert_eq!(extract_integer(&frame, 8, 2, false).unwrap(), 0x0102);
/// assert!(extract_integer(&frame, 60, 4, false).is_err());
/// ```
pub fn extract_integer(
    frame: &[u8; FRAME_SIZE],
    offset: usize,
    length: usize,
    reverse: bool,
) -> Result<u64> {
    Ok(Field::checked(offset, length, reverse)?.read(frame))
}

/// Offsets of the device status response
pub mod status_fields {
    use super::Field;

    pub const LAST_INDEX: Field = Field::new(8, 4, true);
    pub const LATEST_SWIPE: Field = Field::byte(12);
    pub const NO_ACCESS: Field = Field::byte(13);
    pub const LAST_DOOR: Field = Field::byte(14);
    pub const LAST_DOOR_OPEN: Field = Field::byte(15);
    pub const LAST_CARD_ID: Field = Field::new(16, 4, true);
    pub const LAST_SWIPE_TIME: Field = Field::new(20, 7, false);
    pub const LAST_SWIPE_REASON: Field = Field::byte(27);

    pub const DOOR_OPEN: [Field; 4] = [
        Field::byte(28),
        Field::byte(29),
        Field::byte(30),
        Field::byte(31),
    ];

    pub const DOOR_BUTTON: [Field; 4] = [
        Field::byte(32),
        Field::byte(33),
        Field::byte(34),
        Field::byte(35),
    ];

    pub const SYSTEM_STATUS: Field = Field::byte(36);
    pub const SYSTEM_HOUR: Field = Field::byte(37);
    pub const SYSTEM_MINUTE: Field = Field::byte(38);
    pub const SYSTEM_SECOND: Field = Field::byte(39);
    pub const PACKET_SERIAL_NUMBER: Field = Field::new(40, 4, false);
    pub const BACKUP: Field = Field::new(44, 4, false);
    pub const SPECIAL_MESSAGE: Field = Field::byte(48);
    pub const RELAYS: Field = Field::byte(49);
    pub const ALARMS: Field = Field::byte(50);
    pub const SYSTEM_YEAR: Field = Field::byte(51);
    pub const SYSTEM_MONTH: Field = Field::byte(52);
    pub const SYSTEM_DAY: Field = Field::byte(53);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn counting_frame() -> [u8; FRAME_SIZE] {
        let mut frame = [0u8; FRAME_SIZE];
        for (i, b) in frame.iter_mut().enumerate() {
            *b = i as u8;
        }
        frame
    }

    #[test]
    fn test_single_byte() {
        let frame = counting_frame();
        assert_eq!(extract_integer(&frame, 0, 1, false).unwrap(), 0);
        assert_eq!(extract_integer(&frame, 36, 1, true).unwrap(), 36);
        assert_eq!(extract_integer(&frame, 62, 1, false).unwrap(), 62);
    }

    #[test]
    fn test_multi_byte_order() {
        let frame = counting_frame();
        assert_eq!(extract_integer(&frame, 8, 4, false).unwrap(), 0x08090a0b);
        assert_eq!(extract_integer(&frame, 8, 4, true).unwrap(), 0x0b0a0908);
        assert_eq!(
            extract_integer(&frame, 20, 7, false).unwrap(),
            0x1415161718191a
        );
        assert_eq!(
            extract_integer(&frame, 0, 8, true).unwrap(),
            0x0706050403020100
        );
    }

    #[test]
    fn test_bounds() {
        let frame = counting_frame();

        assert!(matches!(
            extract_integer(&frame, 64, 1, false),
            Err(Error::InvalidRange { offset: 64, .. })
        ));
        // offset + length must stay within 63
        assert!(matches!(
            extract_integer(&frame, 63, 1, false),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(
            extract_integer(&frame, 60, 4, false),
            Err(Error::InvalidRange { .. })
        ));
        assert!(extract_integer(&frame, 59, 4, false).is_ok());
        assert!(matches!(
            extract_integer(&frame, 8, 0, false),
            Err(Error::InvalidLength(0))
        ));
        assert!(matches!(
            extract_integer(&frame, 8, 9, false),
            Err(Error::InvalidLength(9))
        ));
    }

    #[test]
    fn test_checked_matches_const() {
        assert_eq!(
            Field::checked(8, 4, true).unwrap(),
            status_fields::LAST_INDEX
        );
        let field = status_fields::LAST_CARD_ID;
        assert_eq!((field.offset(), field.length(), field.reverse()), (16, 4, true));
    }
}
