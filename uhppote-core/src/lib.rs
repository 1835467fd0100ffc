//! # uhppote-core
//!
//! Core protocol implementation for UHPPOTE RFID access control boards.
//!
//! This crate provides the low-level protocol primitives:
//! - Serial number parsing and rendering
//! - 64-byte frame construction and response validation
//! - Function code definitions
//! - Protocol constants
//! - Explicit log sinks

pub mod constants;
pub mod error;
pub mod frame;
pub mod function;
pub mod logging;
pub mod serial;

pub use error::{Error, ErrorKind, Result};
pub use frame::Frame;
pub use function::Function;
pub use logging::LogSink;
pub use serial::{SerialInput, SerialNumber};

pub use constants::{DEFAULT_PORT, FRAME_SIZE, PROTOCOL_VERSION};
