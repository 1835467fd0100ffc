//! Controller serial numbers
//!
//! A board's serial number is printed on its sticker as a 9-digit decimal,
//! but the protocol carries it as four raw bytes (byte-reversed inside
//! frames) and search tools report it as hexadecimal. [`SerialNumber`]
//! accepts all of those shapes and renders every one of them.
//!
//! # Accepted input
//!
//! | input | example | rule |
//! |---|---|---|
//! | integer | `112233445` | used directly |
//! | `0x`/`0X` string | `"0x6b08be5"` | every remaining character must be a hex digit |
//! | 8-char string | `"06b08be5"` | all hex digits |
//! | 9-char string | `"112233445"` | all decimal digits |
//! | 4 bytes | `[0x06, 0xb0, 0x8b, 0xe5]` | big-endian |
//!
//! Whatever the source, the value must lie in `0..=999_999_999`.

use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_SERIAL_NUMBER, SERIAL_SIZE};
use crate::error::{Error, Result};

/// Validated serial number of a controller board
///
/// # Examples
///
/// ```
/// use uhppote_core::SerialNumber;
///
/// let serial: SerialNumber = "0x6b08be5".parse().unwrap();
/// assert_eq!(serial.as_u32(), 112233445);
/// assert_eq!(serial.to_hex_padded(true), "e58bb006");
/// assert_eq!(serial.to_string(), "06b08be5");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SerialNumber(u32);

/// Any of the shapes a serial number may arrive in
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SerialInput<'a> {
    Integer(i64),
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl SerialNumber {
    /// Largest valid serial number
    pub const MAX: u32 = MAX_SERIAL_NUMBER;

    /// Validate a plain integer
    pub fn new(value: u32) -> Result<Self> {
        Self::bounded(u64::from(value), value)
    }

    /// Parse a serial number from any accepted shape
    pub fn parse(input: SerialInput<'_>) -> Result<Self> {
        match input {
            SerialInput::Integer(value) => {
                let unsigned = u64::try_from(value)
                    .map_err(|_| Error::SerialOutOfRange(value.to_string()))?;
                Self::bounded(unsigned, value)
            }
            SerialInput::Text(text) => Self::from_text(text),
            SerialInput::Bytes(bytes) => {
                let raw: [u8; SERIAL_SIZE] = bytes
                    .try_into()
                    .map_err(|_| Error::InvalidSerialLength {
                        actual: bytes.len(),
                    })?;
                let value = u32::from_be_bytes(raw);
                Self::bounded(u64::from(value), format!("0x{}", hex::encode(raw)))
            }
        }
    }

    fn from_text(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidSerialFormat(text.to_string());

        if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            if !is_hex(digits) {
                return Err(invalid());
            }
            return Self::from_hex(digits, text);
        }

        match text.len() {
            8 if is_hex(text) => Self::from_hex(text, text),
            9 if text.bytes().all(|b| b.is_ascii_digit()) => {
                let value = text.parse::<u64>().map_err(|_| invalid())?;
                Self::bounded(value, text)
            }
            _ => Err(invalid()),
        }
    }

    fn from_hex(digits: &str, shown: &str) -> Result<Self> {
        // Digits are already checked, so the only failure left is overflow
        let value = u64::from_str_radix(digits, 16)
            .map_err(|_| Error::SerialOutOfRange(shown.to_string()))?;
        Self::bounded(value, shown)
    }

    fn bounded(value: u64, shown: impl fmt::Display) -> Result<Self> {
        u32::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or_else(|| Error::SerialOutOfRange(shown.to_string()))
    }

    /// Serial number as a plain integer
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// 9-digit, zero-padded decimal form (as printed on the board)
    pub fn to_decimal_string(&self) -> String {
        format!("{:09}", self.0)
    }

    /// Minimal `0x`-prefixed hexadecimal form
    ///
    /// Informational only; frames need [`to_hex_padded`](Self::to_hex_padded).
    pub fn to_hex_string(&self) -> String {
        format!("{:#x}", self.0)
    }

    /// 8-digit lowercase hexadecimal form, byte pairs reversed on request
    pub fn to_hex_padded(&self, reverse: bool) -> String {
        hex::encode(self.to_bytes(reverse))
    }

    /// Four raw bytes, big-endian unless `reverse` is set
    pub fn to_bytes(&self, reverse: bool) -> [u8; SERIAL_SIZE] {
        if reverse {
            self.0.to_le_bytes()
        } else {
            self.0.to_be_bytes()
        }
    }
}

fn is_hex(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_hexdigit())
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_padded(false))
    }
}

impl FromStr for SerialNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(SerialInput::Text(s))
    }
}

impl TryFrom<i64> for SerialNumber {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::parse(SerialInput::Integer(value))
    }
}

impl TryFrom<u64> for SerialNumber {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        Self::bounded(value, value)
    }
}

impl TryFrom<u32> for SerialNumber {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&[u8]> for SerialNumber {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::parse(SerialInput::Bytes(bytes))
    }
}

impl TryFrom<[u8; SERIAL_SIZE]> for SerialNumber {
    type Error = Error;

    fn try_from(bytes: [u8; SERIAL_SIZE]) -> Result<Self> {
        Self::parse(SerialInput::Bytes(&bytes))
    }
}

impl From<SerialNumber> for u32 {
    fn from(serial: SerialNumber) -> u32 {
        serial.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const SAMPLE: u32 = 112233445;

    fn every_shape(serial: u32) -> Vec<SerialNumber> {
        let decimal = format!("{:09}", serial);
        let hex = format!("{:#x}", serial);
        let padded = format!("{:08x}", serial);
        let bytes = serial.to_be_bytes();

        vec![
            SerialNumber::try_from(i64::from(serial)).unwrap(),
            decimal.parse().unwrap(),
            hex.parse().unwrap(),
            padded.parse().unwrap(),
            SerialNumber::try_from(&bytes[..]).unwrap(),
        ]
    }

    #[test]
    fn test_all_shapes_agree() {
        for value in [0, 1, 15, 16, SAMPLE, SerialNumber::MAX] {
            for serial in every_shape(value) {
                assert_eq!(serial.as_u32(), value);
            }
        }
    }

    #[test]
    fn test_sample_renderings() {
        let serial = SerialNumber::new(SAMPLE).unwrap();

        assert_eq!(serial.to_decimal_string(), "112233445");
        assert_eq!(serial.to_hex_string(), "0x6b08be5");
        assert_eq!(serial.to_hex_padded(false), "06b08be5");
        assert_eq!(serial.to_hex_padded(true), "e58bb006");
        assert_eq!(serial.to_bytes(false), [0x06, 0xb0, 0x8b, 0xe5]);
        assert_eq!(serial.to_bytes(true), [0xe5, 0x8b, 0xb0, 0x06]);
        assert_eq!(serial.to_string(), "06b08be5");
    }

    #[test]
    fn test_boundaries() {
        let zero = SerialNumber::new(0).unwrap();
        assert_eq!(zero.to_decimal_string(), "000000000");
        assert_eq!(zero.to_hex_padded(false), "00000000");
        assert_eq!(zero.to_hex_string(), "0x0");
        assert_eq!(zero.to_bytes(false), [0, 0, 0, 0]);

        let max = SerialNumber::new(999_999_999).unwrap();
        assert_eq!(max.to_decimal_string(), "999999999");
        assert_eq!(max.to_hex_padded(false), "3b9ac9ff");
        assert_eq!(max.to_bytes(false), [0x3b, 0x9a, 0xc9, 0xff]);
    }

    #[test]
    fn test_upper_case_hex_prefix() {
        let serial: SerialNumber = "0X6B08BE5".parse().unwrap();
        assert_eq!(serial.as_u32(), SAMPLE);
    }

    #[test]
    fn test_eight_digit_strings_are_hex() {
        let serial: SerialNumber = "00000010".parse().unwrap();
        assert_eq!(serial.as_u32(), 16);
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            SerialNumber::try_from(-1i64),
            Err(Error::SerialOutOfRange(_))
        ));
        assert!(matches!(
            SerialNumber::try_from(1_000_000_000i64),
            Err(Error::SerialOutOfRange(_))
        ));
        assert!(matches!(
            SerialNumber::new(1_000_000_000),
            Err(Error::SerialOutOfRange(_))
        ));
        assert!(matches!(
            "0x3b9aca00".parse::<SerialNumber>(),
            Err(Error::SerialOutOfRange(_))
        ));
        assert!(matches!(
            "3b9aca00".parse::<SerialNumber>(),
            Err(Error::SerialOutOfRange(_))
        ));
        assert!(matches!(
            "0xffffffffffffffffffffffff".parse::<SerialNumber>(),
            Err(Error::SerialOutOfRange(_))
        ));
        assert!(matches!(
            SerialNumber::try_from([0xff, 0xff, 0xff, 0xff]),
            Err(Error::SerialOutOfRange(_))
        ));
        assert!(matches!(
            SerialNumber::try_from(u64::MAX),
            Err(Error::SerialOutOfRange(_))
        ));
    }

    #[test]
    fn test_malformed_strings() {
        for text in [
            "",
            "-1",
            "1000000000",
            "0x",
            "0x1pa42345",
            "-0x1",
            "1pa42345",
            "1abcdef",
            "123abcdef",
            "-12b2cac",
            "+12345678",
            " 12345678",
            "12345678 ",
        ] {
            let result = text.parse::<SerialNumber>();
            assert!(
                matches!(result, Err(Error::InvalidSerialFormat(_))),
                "{text:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_wrong_byte_counts() {
        assert!(matches!(
            SerialNumber::try_from(&[1u8, 2, 3][..]),
            Err(Error::InvalidSerialLength { actual: 3 })
        ));
        assert!(matches!(
            SerialNumber::try_from(&[1u8, 2, 3, 4, 5][..]),
            Err(Error::InvalidSerialLength { actual: 5 })
        ));
        assert!(matches!(
            SerialNumber::try_from(&[0u8; 0][..]),
            Err(Error::InvalidSerialLength { actual: 0 })
        ));
    }

    proptest! {
        #[test]
        fn prop_shapes_round_trip(value in 0u32..=SerialNumber::MAX) {
            let shapes = every_shape(value);
            for serial in &shapes {
                prop_assert_eq!(serial.as_u32(), value);
                prop_assert_eq!(serial, &shapes[0]);
            }

            let serial = shapes[0];
            let from_decimal: SerialNumber = serial.to_decimal_string().parse().unwrap();
            let from_padded: SerialNumber = serial.to_hex_padded(false).parse().unwrap();
            let from_bytes = SerialNumber::try_from(serial.to_bytes(false)).unwrap();
            prop_assert_eq!(from_decimal, serial);
            prop_assert_eq!(from_padded, serial);
            prop_assert_eq!(from_bytes, serial);
        }

        #[test]
        fn prop_reversal_is_an_involution(value in 0u32..=SerialNumber::MAX) {
            let serial = SerialNumber::new(value).unwrap();
            let mut reversed = serial.to_bytes(true);
            reversed.reverse();
            prop_assert_eq!(reversed, serial.to_bytes(false));
            prop_assert_eq!(hex::decode(serial.to_hex_padded(true)).unwrap(), serial.to_bytes(true).to_vec());
        }

        #[test]
        fn prop_above_max_rejected(value in (SerialNumber::MAX as u64 + 1)..=u32::MAX as u64) {
            prop_assert!(SerialNumber::try_from(value).is_err());
        }
    }
}
