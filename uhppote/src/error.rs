//! High-level error types

use uhppote_core::ErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] uhppote_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] uhppote_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] uhppote_types::Error),
}

impl Error {
    /// Which of the four failure families this belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(e) => e.kind(),
            Self::Transport(e) => e.kind(),
            Self::Types(e) => e.kind(),
        }
    }

    /// True when the board answered with a frame that does not match the request
    pub fn is_invalid_response(&self) -> bool {
        self.kind() == ErrorKind::Protocol
    }
}
