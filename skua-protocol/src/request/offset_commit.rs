use crate::offset::{OffsetValue, PartitionOffset, TopicOffsets};
use crate::utils::{ensure, get_string, put_string};
use crate::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/*
frame: [group string][u32 topic_count]
       ([topic string][u32 partition_count]([u32 partition][i64 offset])*)*
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetCommitRequest {
    pub group: String,
    pub topics: Vec<TopicOffsets>,
}

impl OffsetCommitRequest {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::new();
        put_string(&mut buf, &self.group);
        buf.put_u32(self.topics.len() as u32);
        for t in &self.topics {
            put_string(&mut buf, &t.topic);
            buf.put_u32(t.partitions.len() as u32);
            for p in &t.partitions {
                buf.put_u32(p.partition);
                buf.put_i64(p.offset.to_wire());
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
            ensure(&buf, partition_count * 12, "partition offsets")?;
            let mut partitions = Vec::with_capacity(partition_count);
            for _ in 0..partition_count {
                let partition = buf.get_u32();
                let offset = OffsetValue::from_wire(buf.get_i64());
                partitions.push(PartitionOffset { partition, offset });
            }
            topics.push(TopicOffsets { topic, partitions });
        }

        Ok(OffsetCommitRequest { group, topics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_offset_commit() {
        let req = OffsetCommitRequest {
            group: "analytics".into(),
            topics: vec![TopicOffsets::new(
                "orders",
                vec![
                    PartitionOffset {
                        partition: 0,
                        offset: OffsetValue::At(100),
                    },
                    PartitionOffset {
                        partition: 1,
                        offset: OffsetValue::At(7),
                    },
                ],
            )],
        };

        let parsed = OffsetCommitRequest::deserialize(req.serialize()).unwrap();
        assert_eq!(parsed, req);
    }
}
