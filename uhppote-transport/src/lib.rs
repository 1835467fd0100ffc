//! Transport layer for the UHPPOTE protocol
//!
//! Provides blocking TCP communication with controller boards, with
//! connect-retry and complete (never partial) sends and receives.

pub mod endpoint;
pub mod error;
pub mod tcp;

pub use endpoint::{Endpoint, Host, Port};
pub use error::{Error, Result};
pub use tcp::{
    parse_receive_size, validate_receive_size, ConnectionState, Connector, TcpConnector,
    TcpTransport,
};

use bytes::BytesMut;

/// Transport trait for talking to one controller
///
/// A transport owns at most one connection and carries at most one request
/// at a time. It performs no locking; callers sharing one across threads must
/// serialize access themselves.
pub trait Transport: Send {
    /// Connect, trying up to `max_attempts` times
    fn connect(&mut self, max_attempts: u32) -> Result<()>;

    /// Close the connection; safe to call when not connected
    fn close(&mut self);

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Send all of `data`
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive exactly `size` bytes
    fn receive(&mut self, size: usize) -> Result<BytesMut>;

    /// Where this transport connects to
    fn endpoint(&self) -> &Endpoint;

    /// Point the transport somewhere else; takes effect on the next connect
    fn set_endpoint(&mut self, endpoint: Endpoint);
}
