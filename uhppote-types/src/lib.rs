//! Type definitions for uhppote
//!
//! Decoded views over controller responses.

pub mod error;
pub mod field;
pub mod status;

pub use error::{Error, Result};
pub use field::{extract_integer, Field};
pub use status::{AlarmState, ControllerStatus, Door, RelayState};
