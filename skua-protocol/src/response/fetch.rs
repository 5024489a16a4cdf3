use crate::error_code::ErrorCode;
use crate::record::Record;
use crate::utils::ensure;
use crate::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/*
frame: [u32 partition][u64 high_watermark][i16 error][u32 record_count]
       ([u32 record_len][record bytes])*
Records carry their assigned offsets.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub partition: u32,
    pub high_watermark: u64,
    pub error: ErrorCode,
    pub records: Vec<(u64, Record)>,
}

impl FetchResponse {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::new();
        buf.put_u32(self.partition);
        buf.put_u64(self.high_watermark);
        buf.put_i16(self.error as i16);
        buf.put_u32(self.records.len() as u32);
        for (offset, record) in &self.records {
            let raw = record.serialize(*offset);
            buf.put_u32(raw.len() as u32);
            buf.extend_from_slice(&raw);
        }
        buf.freeze()
    }

    pub fn deserialize(mut buf: Bytes) -> Result<Self, ProtocolError> {
        ensure(&buf, 18, "fetch response header")?;
        let partition = buf.get_u32();
        let high_watermark = buf.get_u64();
        let error = ErrorCode::from_wire(buf.get_i16());
        let record_count = buf.get_u32() as usize;

        let mut records = Vec::with_capacity(record_count);
        for _ in 0..record_count {
            ensure(&buf, 4, "record length")?;
            let len = buf.get_u32() as usize;
            ensure(&buf, len, "record body")?;
            let mut raw = buf.split_to(len);
            records.push(Record::deserialize(&mut raw)?);
        }

        Ok(FetchResponse {
            partition,
            high_watermark,
            error,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_fetch_response() {
        let resp = FetchResponse {
            partition: 0,
            high_watermark: 10,
            error: ErrorCode::None,
            records: vec![(
                9,
                Record {
                    key: None,
                    value: b"payload".to_vec(),
                    timestamp: 123,
                    headers: None,
                },
            )],
        };

        let parsed = FetchResponse::deserialize(resp.serialize()).unwrap();
        assert_eq!(parsed, resp);
    }
}
