use crate::error_code::ErrorCode;
use crate::utils::{ensure, get_string, put_string};
use crate::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerMeta {
    pub id: u32,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionMeta {
    pub partition: u32,
    pub leader: u32,
    pub error: ErrorCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicMeta {
    pub topic: String,
    pub partitions: Vec<PartitionMeta>,
}

/*
frame: [u32 broker_count]([u32 id][host string][u16 port])*
       [u32 topic_count]([topic string][u32 partition_count]
                         ([u32 partition][u32 leader][i16 error])*)*
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataResponse {
    pub brokers: Vec<BrokerMeta>,
    pub topics: Vec<TopicMeta>,
}

impl MetadataResponse {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::new();
        buf.put_u32(self.brokers.len() as u32);
        for b in &self.brokers {
            buf.put_u32(b.id);
            put_string(&mut buf, &b.host);
            buf.put_u16(b.port);
        }
        buf.put_u32(self.topics.len() as u32);
        for t in &self.topics {
            put_string(&mut buf, &t.topic);
            buf.put_u32(t.partitions.len() as u32);
            for p in &t.partitions {
                buf.put_u32(p.partition);
                buf.put_u32(p.leader);
                buf.put_i16(p.error as i16);
            }
        }
        buf.freeze()
    }

    pub fn deserialize(mut buf: Bytes) -> Result<Self, ProtocolError> {
        ensure(&buf, 4, "broker count")?;
        let broker_count = buf.get_u32() as usize;
        let mut brokers = Vec::with_capacity(broker_count);
        for _ in 0..broker_count {
            ensure(&buf, 4, "broker id")?;
            let id = buf.get_u32();
            let host = get_string(&mut buf, "broker host")?;
            ensure(&buf, 2, "broker port")?;
            let port = buf.get_u16();
            brokers.push(BrokerMeta { id, host, port });
        }

        ensure(&buf, 4, "topic count")?;
        let topic_count = buf.get_u32() as usize;
        let mut topics = Vec::with_capacity(topic_count);
        for _ in 0..topic_count {
            let topic = get_string(&mut buf, "topic")?;
            ensure(&buf, 4, "partition count")?;
            let partition_count = buf.get_u32() as usize;
            ensure(&buf, partition_count * 10, "partition metadata")?;
            let mut partitions = Vec::with_capacity(partition_count);
            for _ in 0..partition_count {
                let partition = buf.get_u32();
                let leader = buf.get_u32();
                let error = ErrorCode::from_wire(buf.get_i16());
                partitions.push(PartitionMeta {
                    partition,
                    leader,
                    error,
                });
            }
            topics.push(TopicMeta { topic, partitions });
        }

        Ok(MetadataResponse { brokers, topics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_metadata_response() {
        let resp = MetadataResponse {
            brokers: vec![
                BrokerMeta {
                    id: 0,
                    host: "10.0.0.1".into(),
                    port: 9092,
                },
                BrokerMeta {
                    id: 1,
                    host: "10.0.0.2".into(),
                    port: 9092,
                },
            ],
            topics: vec![TopicMeta {
                topic: "orders".into(),
                partitions: vec![
                    PartitionMeta {
                        partition: 0,
                        leader: 0,
                        error: ErrorCode::None,
                    },
                    PartitionMeta {
                        partition: 1,
                        leader: 1,
                        error: ErrorCode::None,
                    },
                ],
            }],
        };

        let parsed = MetadataResponse::deserialize(resp.serialize()).unwrap();
        assert_eq!(parsed, resp);
    }
}
