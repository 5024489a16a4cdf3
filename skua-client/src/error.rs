use skua_protocol::{ApiKey, ErrorCode, ProtocolError};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to connect to broker {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Broker error for {topic}-{partition}: {code:?}")]
    Broker {
        topic: String,
        partition: u32,
        code: ErrorCode,
    },

    #[error("No leader known for {topic}-{partition}")]
    NoLeader { topic: String, partition: u32 },

    #[error("Unknown broker id {0} in metadata")]
    UnknownBroker(u32),

    #[error("No seed brokers configured")]
    NoBrokers,

    #[error("Offset resolution incomplete: no offset returned for {topic}-{partition}")]
    IncompleteResolution { topic: String, partition: u32 },

    #[error("Retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<ClientError> },

    #[error("Unexpected response api key: {0:?}")]
    UnexpectedResponse(ApiKey),

    #[error("Client already disconnected")]
    Disconnected,
}

impl ClientError {
    /// Failures the cluster may recover from by refreshing metadata and
    /// re-routing. Timeouts are deliberately not in this set: they
    /// propagate to the caller with the store untouched.
    pub fn is_retriable(&self) -> bool {
        match self {
            ClientError::Connection { .. } => true,
            ClientError::NoLeader { .. } => true,
            ClientError::UnknownBroker(_) => true,
            ClientError::Broker { code, .. } => code.is_retriable(),
            ClientError::Protocol(ProtocolError::IoError(_)) => true,
            _ => false,
        }
    }
}
