use crate::offset::{OffsetValue, PartitionOffset, TopicOffsets};
use crate::utils::{ensure, get_string, put_string};
use crate::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/*
frame: [u32 topic_count]
       ([topic string][u32 partition_count]([u32 partition][i64 offset])*)*
A partition with no committed offset comes back as the invalid marker.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetFetchResponse {
    pub topics: Vec<TopicOffsets>,
}

impl OffsetFetchResponse {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::new();
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

        Ok(OffsetFetchResponse { topics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncommitted_partition_decodes_as_invalid() {
        let resp = OffsetFetchResponse {
            topics: vec![TopicOffsets::new(
                "orders",
                vec![
                    PartitionOffset {
                        partition: 0,
                        offset: OffsetValue::At(31),
                    },
                    PartitionOffset {
                        partition: 1,
                        offset: OffsetValue::Invalid,
                    },
                ],
            )],
        };

        let parsed = OffsetFetchResponse::deserialize(resp.serialize()).unwrap();
        assert_eq!(parsed, resp);
        assert!(parsed.topics[0].partitions[1].offset.is_invalid());
    }
}
