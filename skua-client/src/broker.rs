use crate::error::ClientError;
use bytes::{Bytes, BytesMut};
use skua_protocol::{ApiKey, Frame, ProtocolError, RequestPayload, ResponsePayload};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// One TCP connection to a broker. Requests are correlated; a response
/// whose correlation id or api key does not match the request in flight
/// is rejected.
pub struct BrokerConnection {
    stream: TcpStream,
    correlation_id: u32,
}

impl BrokerConnection {
    pub async fn connect(addr: &str, timeout: Duration) -> Result<Self, ClientError> {
        let stream = tokio::time::timeout(timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| ClientError::Timeout(timeout))?
            .map_err(|e| ClientError::Connection {
                addr: addr.to_string(),
                source: e,
            })?;

        debug!(addr = %addr, "broker connection established");
        Ok(BrokerConnection {
            stream,
            correlation_id: 0,
        })
    }

    pub async fn send(
        &mut self,
        api_key: ApiKey,
        data: Bytes,
        request_timeout: Duration,
    ) -> Result<Bytes, ClientError> {
        self.correlation_id = self.correlation_id.wrapping_add(1);

        let payload = RequestPayload { api_key, data };
        let frame = Frame::request(self.correlation_id, Vec::from(payload.serialize()));

        let mut buf = BytesMut::new();
        frame.encode(&mut buf);
        self.stream
            .write_all(&buf)
            .await
            .map_err(ProtocolError::IoError)?;

        let response = tokio::time::timeout(request_timeout, self.read_frame())
            .await
            .map_err(|_| ClientError::Timeout(request_timeout))??;

        if response.correlation_id != self.correlation_id {
            return Err(ClientError::UnexpectedResponse(api_key));
        }

        let resp_payload = ResponsePayload::deserialize(Bytes::from(response.payload))?;
        if resp_payload.api_key != api_key {
            return Err(ClientError::UnexpectedResponse(resp_payload.api_key));
        }

        Ok(resp_payload.data)
    }

    async fn read_frame(&mut self) -> Result<Frame, ClientError> {
        let mut buf = BytesMut::with_capacity(4096);
        loop {
            if let Some(frame) = Frame::decode(&mut buf)? {
                return Ok(frame);
            }
            let n = self
                .stream
                .read_buf(&mut buf)
                .await
                .map_err(ProtocolError::IoError)?;
            if n == 0 {
                return Err(ClientError::Protocol(ProtocolError::IncompleteFrame));
            }
        }
    }
}
