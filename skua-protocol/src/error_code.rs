/// Per-partition error codes carried in broker responses. Numbering
/// follows the usual Kafka-flavored convention.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[repr(i16)]
pub enum ErrorCode {
    None = 0,
    OffsetOutOfRange = 1,
    UnknownTopicOrPartition = 3,
    LeaderNotAvailable = 5,
    NotLeader = 6,
    RequestTimedOut = 7,
    Unknown = -1,
}

impl ErrorCode {
    pub fn from_wire(raw: i16) -> ErrorCode {
        match raw {
            0 => ErrorCode::None,
            1 => ErrorCode::OffsetOutOfRange,
            3 => ErrorCode::UnknownTopicOrPartition,
            5 => ErrorCode::LeaderNotAvailable,
            6 => ErrorCode::NotLeader,
            7 => ErrorCode::RequestTimedOut,
            _ => ErrorCode::Unknown,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ErrorCode::None)
    }

    /// Errors worth a metadata refresh and re-route rather than giving up.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ErrorCode::LeaderNotAvailable | ErrorCode::NotLeader | ErrorCode::RequestTimedOut
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_codes() {
        assert!(ErrorCode::LeaderNotAvailable.is_retriable());
        assert!(ErrorCode::NotLeader.is_retriable());
        assert!(!ErrorCode::OffsetOutOfRange.is_retriable());
        assert!(!ErrorCode::None.is_retriable());
        assert_eq!(ErrorCode::from_wire(99), ErrorCode::Unknown);
    }
}
