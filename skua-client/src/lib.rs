pub mod admin;
mod broker;
pub mod client;
pub mod cluster;
pub mod config;
pub mod consumer;
pub mod error;
pub mod initialize;
pub mod metadata;
pub mod producer;
pub mod resolver;
pub mod retry;
pub mod store;

pub use admin::Admin;
pub use client::{ConsumerOptions, Skua};
pub use cluster::Cluster;
pub use config::{ClientConfig, ClusterOverrides, RetryConfig};
pub use consumer::Consumer;
pub use error::ClientError;
pub use initialize::initialize_consumer_offsets;
pub use producer::Producer;
pub use resolver::{resolve_offsets, OffsetsCluster};
pub use store::{CommittedOffsets, OffsetStore, SharedOffsetStore};
