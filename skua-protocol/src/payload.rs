use crate::api_key::ApiKey;
use crate::errors::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

#[derive(Debug)]
pub struct RequestPayload {
    pub api_key: ApiKey,
    pub data: Bytes,
}

impl RequestPayload {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(1 + self.data.len());
        buf.put_u8(self.api_key as u8);
        buf.extend_from_slice(&self.data);
        buf.freeze()
    }

    pub fn deserialize(mut buf: Bytes) -> Result<Self, ProtocolError> {
        if buf.remaining() < 1 {
            return Err(ProtocolError::PayloadError("Empty request payload".into()));
        }

        let api_key = ApiKey::try_from(buf.get_u8())?;
        Ok(RequestPayload { api_key, data: buf })
    }
}

#[derive(Debug)]
pub struct ResponsePayload {
    pub api_key: ApiKey,
    pub data: Bytes,
}

impl ResponsePayload {
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(1 + self.data.len());
        buf.put_u8(self.api_key as u8);
        buf.extend_from_slice(&self.data);
        buf.freeze()
    }

    pub fn deserialize(mut buf: Bytes) -> Result<Self, ProtocolError> {
        if buf.remaining() < 1 {
            return Err(ProtocolError::PayloadError("Empty response payload".into()));
        }

        let api_key = ApiKey::try_from(buf.get_u8())?;
        Ok(ResponsePayload { api_key, data: buf })
    }
}
