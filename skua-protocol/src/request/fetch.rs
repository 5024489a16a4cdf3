use crate::utils::{ensure, get_string, put_string};
use crate::{IsolationLevel, ProtocolError};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/*
frame: [topic string][u32 partition][u64 offset][u32 max_bytes][u8 isolation]
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub topic: String,
    pub partition: u32,
    pub offset: u64,
    pub max_bytes: u32,
    pub isolation_level: IsolationLevel,
}

impl FetchRequest {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::new();
        put_string(&mut buf, &self.topic);
        buf.put_u32(self.partition);
        buf.put_u64(self.offset);
        buf.put_u32(self.max_bytes);
        buf.put_u8(self.isolation_level as u8);
        buf.freeze()
    }

    pub fn deserialize(mut buf: Bytes) -> Result<Self, ProtocolError> {
        let topic = get_string(&mut buf, "topic")?;
        ensure(&buf, 17, "fetch request body")?;
        let partition = buf.get_u32();
        let offset = buf.get_u64();
        let max_bytes = buf.get_u32();
        let isolation_level = IsolationLevel::try_from(buf.get_u8())?;

        Ok(FetchRequest {
            topic,
            partition,
            offset,
            max_bytes,
            isolation_level,
        })
    }
}
