use uhppote_core::ErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid range: offset {offset}, length {length} (expected offset below 64 and offset + length within 63)")]
    InvalidRange { offset: usize, length: usize },

    #[error("Invalid length: {0} bytes (expected 1 to 8)")]
    InvalidLength(usize),

    #[error("Invalid door number: {0} (expected 1 to 4)")]
    InvalidDoor(u8),

    #[error("Not a status frame: function 0x{0:02x}")]
    NotStatusFrame(u8),

    #[error(transparent)]
    Core(#[from] uhppote_core::Error),
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRange { .. } | Self::InvalidLength(_) | Self::InvalidDoor(_) => {
                ErrorKind::Validation
            }
            Self::NotStatusFrame(_) => ErrorKind::Protocol,
            Self::Core(e) => e.kind(),
        }
    }
}
