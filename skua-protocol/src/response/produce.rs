use crate::error_code::ErrorCode;
use crate::utils::ensure;
use crate::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/*
frame: [u32 partition][u64 base_offset][i16 error]
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProduceAck {
    pub partition: u32,
    pub base_offset: u64,
    pub error: ErrorCode,
}

impl ProduceAck {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(14);
        buf.put_u32(self.partition);
        buf.put_u64(self.base_offset);
        buf.put_i16(self.error as i16);
        buf.freeze()
    }

    pub fn deserialize(mut buf: Bytes) -> Result<Self, ProtocolError> {
        ensure(&buf, 14, "produce ack")?;
        let partition = buf.get_u32();
        let base_offset = buf.get_u64();
        let error = ErrorCode::from_wire(buf.get_i16());

        Ok(ProduceAck {
            partition,
            base_offset,
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_produce_ack() {
        let ack = ProduceAck {
            partition: 2,
            base_offset: 57,
            error: ErrorCode::None,
        };

        let parsed = ProduceAck::deserialize(ack.serialize()).unwrap();
        assert_eq!(parsed, ack);
    }
}
