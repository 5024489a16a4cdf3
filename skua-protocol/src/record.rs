/*
[ offset       : u64 ]
[ timestamp    : u64 ]
[ key_len      : u32 ][ key bytes ]
[ value_len    : u32 ][ value bytes ]
[ header_count : u32 ][ headers: (key_len, key, val_len, val)* ]
*/
use crate::utils::{get_string, put_string};
use crate::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: Option<Vec<u8>>,
    pub value: Vec<u8>,
    pub timestamp: u64,
    pub headers: Option<Vec<(String, Vec<u8>)>>,
}

impl Record {
    pub fn serialize(&self, offset: u64) -> Bytes {
        let mut buf = BytesMut::new();
        buf.put_u64(offset);
        buf.put_u64(self.timestamp);

        match &self.key {
            Some(key) => {
                buf.put_u32(key.len() as u32);
                buf.extend_from_slice(key);
            }
            None => buf.put_u32(0),
        }

        buf.put_u32(self.value.len() as u32);
        buf.extend_from_slice(&self.value);

        match &self.headers {
            Some(headers) => {
                buf.put_u32(headers.len() as u32);
                for (k, v) in headers {
                    put_string(&mut buf, k);
                    buf.put_u32(v.len() as u32);
                    buf.extend_from_slice(v);
                }
            }
            None => buf.put_u32(0),
        }

        buf.freeze()
    }

    pub fn deserialize(buf: &mut Bytes) -> Result<(u64, Record), ProtocolError> {
        if buf.remaining() < 16 {
            return Err(ProtocolError::PayloadError(
                "Insufficient data for record header".into(),
            ));
        }
        let offset = buf.get_u64();
        let timestamp = buf.get_u64();

        let key = read_blob(buf, "record key")?;
        let key = if key.is_empty() { None } else { Some(key) };

        let value = read_blob(buf, "record value")?;

        if buf.remaining() < 4 {
            return Err(ProtocolError::PayloadError(
                "Insufficient data for header count".into(),
            ));
        }
        let header_count = buf.get_u32() as usize;
        let mut headers = Vec::with_capacity(header_count);
        for _ in 0..header_count {
            let k = get_string(buf, "header key")?;
            let v = read_blob(buf, "header value")?;
            headers.push((k, v));
        }

        Ok((
            offset,
            Record {
                key,
                value,
                timestamp,
                headers: if headers.is_empty() { None } else { Some(headers) },
            },
        ))
    }
}

fn read_blob(buf: &mut Bytes, what: &str) -> Result<Vec<u8>, ProtocolError> {
    if buf.remaining() < 4 {
        return Err(ProtocolError::PayloadError(format!(
            "Insufficient data for {} length",
            what
        )));
    }
    let len = buf.get_u32() as usize;
    if buf.remaining() < len {
        return Err(ProtocolError::PayloadError(format!(
            "Buffer too short for {}",
            what
        )));
    }
    Ok(buf.split_to(len).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_roundtrip() {
        let original = Record {
            key: Some(b"user-42".to_vec()),
            value: b"click:event".to_vec(),
            timestamp: 1700000000000,
            headers: Some(vec![("source".to_string(), b"web".to_vec())]),
        };

        let mut bytes = original.serialize(12345);
        let (offset, parsed) = Record::deserialize(&mut bytes).expect("deserialize failed");

        assert_eq!(offset, 12345);
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_record_without_key_or_headers() {
        let record = Record {
            key: None,
            value: b"just value".to_vec(),
            timestamp: 42,
            headers: None,
        };

        let mut bytes = record.serialize(1);
        let (_, parsed) = Record::deserialize(&mut bytes).unwrap();
        assert_eq!(parsed.key, None);
        assert_eq!(parsed.headers, None);
        assert_eq!(parsed.value, record.value);
    }
}
