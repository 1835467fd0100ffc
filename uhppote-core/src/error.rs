//! Error types for uhppote-core

/// Result type alias for uhppote operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure classes shared by every crate in the workspace
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed caller input, always caught before any I/O
    Validation,

    /// Could not connect, or an operation needed an open connection
    Connection,

    /// An established connection broke mid-transfer
    Transmission,

    /// A complete response whose header fields are not what was asked for
    Protocol,
}

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial number given as bytes with the wrong length
    #[error("Serial number as bytes requires exactly 4 bytes, got {actual}")]
    InvalidSerialLength {
        actual: usize,
    },

    /// Serial number string is neither hexadecimal nor a 9-digit decimal
    #[error("Serial number must be hexadecimal or a 9-digit decimal, got {0:?}")]
    InvalidSerialFormat(String),

    /// Serial number outside 0..=999,999,999
    #[error("Serial number out of bounds (0 to 999,999,999): {0}")]
    SerialOutOfRange(String),

    /// Function code outside the range the controller accepts
    #[error("Function code 0x{0:02x} outside 0x20..=0x82")]
    InvalidFunction(u8),

    /// Function code inside the valid range but not one this library knows
    #[error("Unknown function code: 0x{0:02x}")]
    UnknownFunction(u8),

    /// Serial block plus payload would not fit in one frame
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge {
        size: usize,
        max: usize,
    },

    /// Response was not exactly one frame long
    #[error("Unexpected response length: expected {expected} bytes, got {actual} bytes")]
    FrameLength {
        expected: usize,
        actual: usize,
    },

    /// Response byte 0 is not the protocol version
    #[error("Unexpected version: expected 0x{expected:02x}, received 0x{actual:02x}")]
    VersionMismatch {
        expected: u8,
        actual: u8,
    },

    /// Response byte 1 is not the requested function
    #[error("Unexpected function: expected 0x{expected:02x}, received 0x{actual:02x}")]
    FunctionMismatch {
        expected: u8,
        actual: u8,
    },

    /// Response bytes 2..4 are not zero
    #[error("Unexpected reserved bytes: expected 0000, received {}", hex::encode(.actual))]
    ReservedNotZero {
        actual: [u8; 2],
    },

    /// Response bytes 4..8 carry a different serial number
    #[error("Unexpected serial: expected {}, received {}", hex::encode(.expected), hex::encode(.actual))]
    SerialMismatch {
        expected: [u8; 4],
        actual: [u8; 4],
    },
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSerialLength { .. }
            | Self::InvalidSerialFormat(_)
            | Self::SerialOutOfRange(_)
            | Self::InvalidFunction(_)
            | Self::UnknownFunction(_)
            | Self::PayloadTooLarge { .. } => ErrorKind::Validation,
            Self::FrameLength { .. }
            | Self::VersionMismatch { .. }
            | Self::FunctionMismatch { .. }
            | Self::ReservedNotZero { .. }
            | Self::SerialMismatch { .. } => ErrorKind::Protocol,
        }
    }

    /// Check if the response came from a different device or protocol
    pub fn is_protocol_mismatch(&self) -> bool {
        self.kind() == ErrorKind::Protocol
    }
}
