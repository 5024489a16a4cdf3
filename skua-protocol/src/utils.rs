use crate::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

pub fn put_string(buf: &mut BytesMut, s: &str) {
    buf.put_u32(s.len() as u32);
    buf.extend_from_slice(s.as_bytes());
}

pub fn get_string(buf: &mut Bytes, what: &str) -> Result<String, ProtocolError> {
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
    String::from_utf8(buf.split_to(len).to_vec())
        .map_err(|_| ProtocolError::PayloadError(format!("Invalid UTF-8 in {}", what)))
}

pub fn ensure(buf: &Bytes, n: usize, what: &str) -> Result<(), ProtocolError> {
    if buf.remaining() < n {
        return Err(ProtocolError::PayloadError(format!(
            "Insufficient data for {}",
            what
        )));
    }
    Ok(())
}
