use crate::utils::{ensure, get_string, put_string};
use crate::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/*
frame: [u8 allow_auto_topic_creation][u32 topic_count][topic string]*
An empty topic list asks for every topic the cluster knows.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRequest {
    pub topics: Vec<String>,
    pub allow_auto_topic_creation: bool,
}

impl MetadataRequest {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::new();
        buf.put_u8(self.allow_auto_topic_creation as u8);
        buf.put_u32(self.topics.len() as u32);
        for topic in &self.topics {
            put_string(&mut buf, topic);
        }
        buf.freeze()
    }

    pub fn deserialize(mut buf: Bytes) -> Result<Self, ProtocolError> {
        ensure(&buf, 5, "metadata request header")?;
        let allow_auto_topic_creation = buf.get_u8() != 0;
        let topic_count = buf.get_u32() as usize;

        let mut topics = Vec::with_capacity(topic_count);
        for _ in 0..topic_count {
            topics.push(get_string(&mut buf, "topic")?);
        }

        Ok(MetadataRequest {
            topics,
            allow_auto_topic_creation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_metadata_request() {
        let req = MetadataRequest {
            topics: vec!["orders".into(), "payments".into()],
            allow_auto_topic_creation: true,
        };

        let parsed = MetadataRequest::deserialize(req.serialize()).unwrap();
        assert_eq!(parsed, req);
    }
}
