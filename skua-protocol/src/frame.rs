/*
[ version        : u8  ]
[ frame_type     : u8  ]
[ correlation_id : u32 ]
[ payload_len    : u32 ]
[ checksum       : u32 ]
[ payload bytes...     ]
*/

use crate::ProtocolError;
use bytes::{Buf, BufMut, BytesMut};
use xxhash_rust::xxh32::xxh32;

pub const FRAME_VERSION: u8 = 1;
const HEADER_LEN: usize = 14;

#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameType {
    Request = 1,
    Response = 2,
    Error = 3,
}

impl TryFrom<u8> for FrameType {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, ProtocolError> {
        match value {
            1 => Ok(FrameType::Request),
            2 => Ok(FrameType::Response),
            3 => Ok(FrameType::Error),
            _ => Err(ProtocolError::UnknownFrameType(value)),
        }
    }
}

#[derive(Debug)]
pub struct Frame {
    pub version: u8,
    pub frame_type: FrameType,
    /// Matches a response to the request that caused it.
    pub correlation_id: u32,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn request(correlation_id: u32, payload: Vec<u8>) -> Frame {
        Frame {
            version: FRAME_VERSION,
            frame_type: FrameType::Request,
            correlation_id,
            payload,
        }
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.version);
        buf.put_u8(self.frame_type as u8);
        buf.put_u32(self.correlation_id);
        buf.put_u32(self.payload.len() as u32);
        buf.put_u32(xxh32(&self.payload, 0));
        buf.extend_from_slice(&self.payload);
    }

    /// Returns `Ok(None)` while the buffer does not yet hold a full frame;
    /// the caller keeps reading and retries.
    pub fn decode(buf: &mut BytesMut) -> Result<Option<Frame>, ProtocolError> {
        if buf.len() < HEADER_LEN {
            return Ok(None);
        }

        let mut cursor = &buf[..];
        let version = cursor.get_u8();
        let frame_type_raw = cursor.get_u8();
        let correlation_id = cursor.get_u32();
        let payload_len = cursor.get_u32() as usize;
        let checksum_expected = cursor.get_u32();

        if cursor.remaining() < payload_len {
            return Ok(None);
        }

        buf.advance(HEADER_LEN);
        let payload = buf.split_to(payload_len).to_vec();

        let checksum_actual = xxh32(&payload, 0);
        if checksum_actual != checksum_expected {
            return Err(ProtocolError::ChecksumMismatch {
                expected: checksum_expected,
                found: checksum_actual,
            });
        }

        Ok(Some(Frame {
            version,
            frame_type: FrameType::try_from(frame_type_raw)?,
            correlation_id,
            payload,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_roundtrip() {
        let frame = Frame::request(7, b"hello".to_vec());

        let mut buf = BytesMut::new();
        frame.encode(&mut buf);

        let decoded = Frame::decode(&mut buf).unwrap().expect("full frame");
        assert_eq!(decoded.version, FRAME_VERSION);
        assert_eq!(decoded.frame_type, FrameType::Request);
        assert_eq!(decoded.correlation_id, 7);
        assert_eq!(decoded.payload, b"hello".to_vec());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_partial_frame_returns_none() {
        let frame = Frame::request(1, b"partial".to_vec());
        let mut buf = BytesMut::new();
        frame.encode(&mut buf);

        let mut short = BytesMut::from(&buf[..buf.len() - 3]);
        assert!(Frame::decode(&mut short).unwrap().is_none());
        // nothing consumed while incomplete
        assert_eq!(short.len(), buf.len() - 3);
    }

    #[test]
    fn test_corrupted_payload_fails_checksum() {
        let frame = Frame::request(1, b"watch me".to_vec());
        let mut buf = BytesMut::new();
        frame.encode(&mut buf);

        let last = buf.len() - 1;
        buf[last] ^= 0xFF;

        assert!(matches!(
            Frame::decode(&mut buf),
            Err(ProtocolError::ChecksumMismatch { .. })
        ));
    }
}
