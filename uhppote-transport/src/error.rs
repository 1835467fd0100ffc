//! Transport errors

use std::io;

use uhppote_core::ErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not connected")]
    NotConnected,

    #[error("Already connected")]
    AlreadyConnected,

    #[error("Unable to connect to {endpoint} after {attempts} attempts: {source}")]
    ConnectFailed {
        endpoint: String,
        attempts: u32,
        #[source]
        source: io::Error,
    },

    #[error("Connection broken: sent {sent} of {expected} bytes")]
    ConnectionBroken {
        sent: usize,
        expected: usize,
    },

    #[error("Unexpected end of connection: received {received} bytes, but expected {expected}")]
    UnexpectedEof {
        received: usize,
        expected: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid host: {0:?}")]
    InvalidHost(String),

    #[error("Invalid port: {0:?} (expected 1 to 65535)")]
    InvalidPort(String),

    #[error("Invalid number of connection attempts: {0} (expected at least 1)")]
    InvalidAttempts(u32),

    #[error("Expected a message to send, received an empty one")]
    EmptyMessage,

    #[error("Invalid receive size: {0:?} (expected a positive multiple of 8)")]
    InvalidReceiveSize(String),
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotConnected | Self::AlreadyConnected | Self::ConnectFailed { .. } => {
                ErrorKind::Connection
            }
            Self::ConnectionBroken { .. } | Self::UnexpectedEof { .. } | Self::Io(_) => {
                ErrorKind::Transmission
            }
            Self::InvalidHost(_)
            | Self::InvalidPort(_)
            | Self::InvalidAttempts(_)
            | Self::EmptyMessage
            | Self::InvalidReceiveSize(_) => ErrorKind::Validation,
        }
    }
}
