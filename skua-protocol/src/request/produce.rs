use crate::record::Record;
use crate::utils::{ensure, get_string, put_string};
use crate::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/*
frame: [topic string][u32 partition][u32 record_count]
       ([u32 record_len][record bytes])*
Records carry offset 0 on the way in; the broker assigns real offsets.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProduceRequest {
    pub topic: String,
    pub partition: u32,
    pub records: Vec<Record>,
}

impl ProduceRequest {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::new();
        put_string(&mut buf, &self.topic);
        buf.put_u32(self.partition);
        buf.put_u32(self.records.len() as u32);
        for record in &self.records {
            let raw = record.serialize(0);
            buf.put_u32(raw.len() as u32);
            buf.extend_from_slice(&raw);
        }
        buf.freeze()
    }

    pub fn deserialize(mut buf: Bytes) -> Result<Self, ProtocolError> {
        let topic = get_string(&mut buf, "topic")?;
        ensure(&buf, 8, "partition + record count")?;
        let partition = buf.get_u32();
        let record_count = buf.get_u32() as usize;

        let mut records = Vec::with_capacity(record_count);
        for _ in 0..record_count {
            ensure(&buf, 4, "record length")?;
            let len = buf.get_u32() as usize;
            ensure(&buf, len, "record body")?;
            let mut raw = buf.split_to(len);
            let (_, record) = Record::deserialize(&mut raw)?;
            records.push(record);
        }

        Ok(ProduceRequest {
            topic,
            partition,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_produce() {
        let req = ProduceRequest {
            topic: "orders".into(),
            partition: 3,
            records: vec![Record {
                key: Some(b"k".to_vec()),
                value: b"v".to_vec(),
                timestamp: 11,
                headers: None,
            }],
        };

        let parsed = ProduceRequest::deserialize(req.serialize()).unwrap();
        assert_eq!(parsed, req);
    }
}
