use crate::utils::{ensure, get_string, put_string};
use crate::{IsolationLevel, ProtocolError};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// One topic's worth of partitions that still need a broker-confirmed
/// offset. `from_beginning` is a topic-level choice: earliest wins for the
/// whole topic if any partition asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOffsetsTopic {
    pub topic: String,
    pub partitions: Vec<u32>,
    pub from_beginning: bool,
}

/*
frame: [u8 isolation][u32 topic_count]
       ([topic string][u8 from_beginning][u32 partition_count][u32 partition]*)*
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOffsetsRequest {
    pub isolation_level: IsolationLevel,
    pub topics: Vec<ListOffsetsTopic>,
}

impl ListOffsetsRequest {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::new();
        buf.put_u8(self.isolation_level as u8);
        buf.put_u32(self.topics.len() as u32);
        for t in &self.topics {
            put_string(&mut buf, &t.topic);
            buf.put_u8(t.from_beginning as u8);
            buf.put_u32(t.partitions.len() as u32);
            for p in &t.partitions {
                buf.put_u32(*p);
            }
        }
        buf.freeze()
    }

    pub fn deserialize(mut buf: Bytes) -> Result<Self, ProtocolError> {
        ensure(&buf, 5, "isolation level + topic count")?;
        let isolation_level = IsolationLevel::try_from(buf.get_u8())?;
        let topic_count = buf.get_u32() as usize;

        let mut topics = Vec::with_capacity(topic_count);
        for _ in 0..topic_count {
            let topic = get_string(&mut buf, "topic")?;
            ensure(&buf, 5, "from_beginning + partition count")?;
            let from_beginning = buf.get_u8() != 0;
            let partition_count = buf.get_u32() as usize;
            ensure(&buf, partition_count * 4, "partition list")?;
            let mut partitions = Vec::with_capacity(partition_count);
            for _ in 0..partition_count {
                partitions.push(buf.get_u32());
            }
            topics.push(ListOffsetsTopic {
                topic,
                partitions,
                from_beginning,
            });
        }

        Ok(ListOffsetsRequest {
            isolation_level,
            topics,
        })
    }
}
