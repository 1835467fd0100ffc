//! # uhppote
//!
//! Client for UHPPOTE RFID access control boards over TCP.
//!
//! ## Features
//!
//! - Serial numbers accepted as integers, decimal or hex strings, or raw bytes
//! - Blocking TCP transport with connect retry and complete sends and receives
//! - 64-byte request frames validated against the board's reply
//! - Status responses decoded through a declarative field table
//! - Per-instance log sinks built on `tracing`
//!
//! ## Quick Start
//!
//! ```no_run
//! use uhppote::{Controller, SerialNumber};
//!
//! fn main() -> uhppote::Result<()> {
//!     let serial: SerialNumber = "423187757".parse()?;
//!     let mut controller = Controller::new("192.168.1.100", serial)?;
//!
//!     let status = controller.status()?;
//!     println!("{}", status);
//!
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod error;

// Re-exports
pub use controller::Controller;
pub use error::{Error, Result};

pub use uhppote_core::{ErrorKind, Frame, Function, LogSink, SerialInput, SerialNumber};
pub use uhppote_transport::{Endpoint, Host, Port, TcpTransport, Transport};
pub use uhppote_types::{AlarmState, ControllerStatus, Door, RelayState};
