use crate::utils::{ensure, get_string, put_string};
use crate::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetFetchTopic {
    pub topic: String,
    pub partitions: Vec<u32>,
}

/*
frame: [group string][u32 topic_count]
       ([topic string][u32 partition_count][u32 partition]*)*
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetFetchRequest {
    pub group: String,
    pub topics: Vec<OffsetFetchTopic>,
}

impl OffsetFetchRequest {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::new();
        put_string(&mut buf, &self.group);
        buf.put_u32(self.topics.len() as u32);
        for t in &self.topics {
            put_string(&mut buf, &t.topic);
            buf.put_u32(t.partitions.len() as u32);
            for p in &t.partitions {
                buf.put_u32(*p);
            }
        }
        buf.freeze()
    }

    pub fn deserialize(mut buf: Bytes) -> Result<Self, ProtocolError> {
        let group = get_string(&mut buf, "group")?;
        ensure(&buf, 4, "topic count")?;
        let topic_count = buf.get_u32() as usize;

        let mut topics = Vec::with_capacity(topic_count);
        for _ in 0..topic_count {
            let topic = get_string(&mut buf, "topic")?;
            ensure(&buf, 4, "partition count")?;
            let partition_count = buf.get_u32() as usize;
            ensure(&buf, partition_count * 4, "partition list")?;
            let mut partitions = Vec::with_capacity(partition_count);
            for _ in 0..partition_count {
                partitions.push(buf.get_u32());
            }
            topics.push(OffsetFetchTopic { topic, partitions });
        }

        Ok(OffsetFetchRequest { group, topics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_offset_fetch() {
        let req = OffsetFetchRequest {
            group: "email-worker".into(),
            topics: vec![OffsetFetchTopic {
                topic: "orders".into(),
                partitions: vec![0, 1, 2],
            }],
        };

        let parsed = OffsetFetchRequest::deserialize(req.serialize()).unwrap();
        assert_eq!(parsed, req);
    }
}
