mod fetch;
mod list_offsets;
mod metadata;
mod offset_fetch;
mod produce;

pub use fetch::FetchResponse;
pub use list_offsets::{ListOffsetsPartition, ListOffsetsResponse, ListOffsetsResponseTopic};
pub use metadata::{BrokerMeta, MetadataResponse, PartitionMeta, TopicMeta};
pub use offset_fetch::OffsetFetchResponse;
pub use produce::ProduceAck;
