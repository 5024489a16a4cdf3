use std::io::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Unknown api key: {0}")]
    UnknownApiKey(u8),

    #[error("Incomplete frame")]
    IncompleteFrame,

    #[error("Unknown frame type: {0}")]
    UnknownFrameType(u8),

    #[error("Unknown isolation level: {0}")]
    UnknownIsolationLevel(u8),

    #[error("Checksum mismatch expected: {expected} found: {found}")]
    ChecksumMismatch { expected: u32, found: u32 },

    #[error("Payload decode error: {0}")]
    PayloadError(String),

    #[error("IoError: {0}")]
    IoError(Error),
}
