pub mod api_key;
pub mod error_code;
pub mod errors;
pub mod frame;
pub mod isolation_level;
pub mod offset;
pub mod payload;
pub mod record;
mod request;
mod response;
mod utils;

// Public re-exports for easy access
pub use api_key::ApiKey;
pub use error_code::ErrorCode;
pub use errors::ProtocolError;
pub use frame::{Frame, FrameType};
pub use isolation_level::IsolationLevel;
pub use offset::{OffsetValue, PartitionOffset, TopicOffsets};
pub use payload::{RequestPayload, ResponsePayload};
pub use record::Record;

// Re-export common requests/responses
pub use request::{
    FetchRequest, ListOffsetsRequest, ListOffsetsTopic, MetadataRequest, OffsetCommitRequest,
    OffsetFetchRequest, OffsetFetchTopic, ProduceRequest,
};
pub use response::{
    BrokerMeta, FetchResponse, ListOffsetsPartition, ListOffsetsResponse, ListOffsetsResponseTopic,
    MetadataResponse, OffsetFetchResponse, PartitionMeta, ProduceAck, TopicMeta,
};
