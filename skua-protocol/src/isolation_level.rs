use crate::ProtocolError;

/// Threaded through ListOffsets and Fetch; opaque to everything above the
/// cluster layer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum IsolationLevel {
    ReadUncommitted = 0,
    #[default]
    ReadCommitted = 1,
}

impl TryFrom<u8> for IsolationLevel {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(IsolationLevel::ReadUncommitted),
            1 => Ok(IsolationLevel::ReadCommitted),
            _ => Err(ProtocolError::UnknownIsolationLevel(value)),
        }
    }
}
