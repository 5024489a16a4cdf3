use crate::error_code::ErrorCode;
use crate::utils::{ensure, get_string, put_string};
use crate::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOffsetsPartition {
    pub partition: u32,
    pub error: ErrorCode,
    /// Meaningful only when `error` is `None`.
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOffsetsResponseTopic {
    pub topic: String,
    pub partitions: Vec<ListOffsetsPartition>,
}

/*
frame: [u32 topic_count]
       ([topic string][u32 partition_count]([u32 partition][i16 error][u64 offset])*)*
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOffsetsResponse {
    pub topics: Vec<ListOffsetsResponseTopic>,
}

impl ListOffsetsResponse {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::new();
        buf.put_u32(self.topics.len() as u32);
        for t in &self.topics {
            put_string(&mut buf, &t.topic);
            buf.put_u32(t.partitions.len() as u32);
            for p in &t.partitions {
                buf.put_u32(p.partition);
                buf.put_i16(p.error as i16);
                buf.put_u64(p.offset);
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
            ensure(&buf, partition_count * 14, "partition offsets")?;
            let mut partitions = Vec::with_capacity(partition_count);
            for _ in 0..partition_count {
                let partition = buf.get_u32();
                let error = ErrorCode::from_wire(buf.get_i16());
                let offset = buf.get_u64();
                partitions.push(ListOffsetsPartition {
                    partition,
                    error,
                    offset,
                });
            }
            topics.push(ListOffsetsResponseTopic { topic, partitions });
        }

        Ok(ListOffsetsResponse { topics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_list_offsets_response() {
        let resp = ListOffsetsResponse {
            topics: vec![ListOffsetsResponseTopic {
                topic: "orders".into(),
                partitions: vec![
                    ListOffsetsPartition {
                        partition: 0,
                        error: ErrorCode::None,
                        offset: 100,
                    },
                    ListOffsetsPartition {
                        partition: 1,
                        error: ErrorCode::LeaderNotAvailable,
                        offset: 0,
                    },
                ],
            }],
        };

        let parsed = ListOffsetsResponse::deserialize(resp.serialize()).unwrap();
        assert_eq!(parsed, resp);
    }
}
