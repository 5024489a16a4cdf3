mod fetch;
mod list_offsets;
mod metadata;
mod offset_commit;
mod offset_fetch;
mod produce;

pub use fetch::FetchRequest;
pub use list_offsets::{ListOffsetsRequest, ListOffsetsTopic};
pub use metadata::MetadataRequest;
pub use offset_commit::OffsetCommitRequest;
pub use offset_fetch::{OffsetFetchRequest, OffsetFetchTopic};
pub use produce::ProduceRequest;
