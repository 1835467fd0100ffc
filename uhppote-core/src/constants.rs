//! Protocol constants

/// Version byte carried at offset 0 of every frame
pub const PROTOCOL_VERSION: u8 = 0x17;

/// Every request and response is exactly this many bytes
pub const FRAME_SIZE: usize = 64;

/// Version, function and two reserved bytes
pub const HEADER_SIZE: usize = 4;

/// Room left for the serial block and payload
pub const BODY_SIZE: usize = FRAME_SIZE - HEADER_SIZE;

/// Width of the (reversed) serial number block at offset 4
pub const SERIAL_SIZE: usize = 4;

/// Default controller port
pub const DEFAULT_PORT: u16 = 60000;

/// Connection attempts made before giving up
pub const DEFAULT_CONNECT_ATTEMPTS: u32 = 3;

/// Largest single read issued while collecting a response
pub const MAX_CHUNK_SIZE: usize = 2048;

/// Lowest function code a controller accepts
pub const MIN_FUNCTION: u8 = 0x20;

/// Highest function code a controller accepts
pub const MAX_FUNCTION: u8 = 0x82;

/// Largest serial number printed on a board (0x3B9AC9FF)
pub const MAX_SERIAL_NUMBER: u32 = 999_999_999;
